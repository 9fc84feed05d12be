//! The route table: every screen the dashboard can show, its fragment
//! template and how many ids it is addressed by.

use crate::api::Resource;
use crate::error::RouteError;
use serde::Serialize;
use std::borrow::Cow;

/// One piece of a fragment template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Literal(&'static str),
    Primary,
    Secondary,
}

use Segment::{Literal, Primary, Secondary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteKind {
    #[default]
    Dashboard,
    Incidents,
    IncidentNew,
    IncidentDetail,
    IncidentEdit,
    ChangeRequests,
    ChangeRequestNew,
    ChangeRequestDetail,
    ChangeRequestEdit,
    RiskRegisters,
    RiskRegisterDetail,
    MonitoringDashboards,
    PasswordVault,
    PasswordEntryDetail,
    Projects,
    ProjectNew,
    ProjectDetail,
    ProjectEdit,
    ProjectApps,
    AppDetail,
    ProjectAppDetail,
}

impl RouteKind {
    pub const ALL: [Self; 21] = [
        Self::Dashboard,
        Self::Incidents,
        Self::IncidentNew,
        Self::IncidentDetail,
        Self::IncidentEdit,
        Self::ChangeRequests,
        Self::ChangeRequestNew,
        Self::ChangeRequestDetail,
        Self::ChangeRequestEdit,
        Self::RiskRegisters,
        Self::RiskRegisterDetail,
        Self::MonitoringDashboards,
        Self::PasswordVault,
        Self::PasswordEntryDetail,
        Self::Projects,
        Self::ProjectNew,
        Self::ProjectDetail,
        Self::ProjectEdit,
        Self::ProjectApps,
        Self::AppDetail,
        Self::ProjectAppDetail,
    ];

    /// Stable name used by `navigate_to_route` and the automation bridge.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Incidents => "incidents",
            Self::IncidentNew => "incident-new",
            Self::IncidentDetail => "incident-detail",
            Self::IncidentEdit => "incident-edit",
            Self::ChangeRequests => "change-requests",
            Self::ChangeRequestNew => "change-request-new",
            Self::ChangeRequestDetail => "change-request-detail",
            Self::ChangeRequestEdit => "change-request-edit",
            Self::RiskRegisters => "risk-registers",
            Self::RiskRegisterDetail => "risk-register-detail",
            Self::MonitoringDashboards => "monitoring-dashboards",
            Self::PasswordVault => "password-vault",
            Self::PasswordEntryDetail => "password-entry-detail",
            Self::Projects => "projects",
            Self::ProjectNew => "project-new",
            Self::ProjectDetail => "project-detail",
            Self::ProjectEdit => "project-edit",
            Self::ProjectApps => "project-apps",
            Self::AppDetail => "app-detail",
            Self::ProjectAppDetail => "project-app-detail",
        }
    }

    /// Fragment template, without the leading `#`.
    #[must_use]
    pub const fn template(self) -> &'static [Segment] {
        match self {
            Self::Dashboard => &[Literal("dashboard")],
            Self::Incidents => &[Literal("incidents")],
            Self::IncidentNew => &[Literal("incident-new")],
            Self::IncidentDetail => &[Literal("incident"), Primary],
            Self::IncidentEdit => &[Literal("incident"), Primary, Literal("edit")],
            Self::ChangeRequests => &[Literal("change-requests")],
            Self::ChangeRequestNew => &[Literal("change-request-new")],
            Self::ChangeRequestDetail => &[Literal("change-request"), Primary],
            Self::ChangeRequestEdit => &[Literal("change-request"), Primary, Literal("edit")],
            Self::RiskRegisters => &[Literal("risk-registers")],
            Self::RiskRegisterDetail => &[Literal("risk-register"), Primary],
            Self::MonitoringDashboards => &[Literal("monitoring-dashboards")],
            Self::PasswordVault => &[Literal("password-vault")],
            Self::PasswordEntryDetail => &[Literal("password-vault"), Primary],
            Self::Projects => &[Literal("projects")],
            Self::ProjectNew => &[Literal("project-new")],
            Self::ProjectDetail => &[Literal("project"), Primary],
            Self::ProjectEdit => &[Literal("project"), Primary, Literal("edit")],
            Self::ProjectApps => &[Literal("project-apps")],
            Self::AppDetail => &[Literal("project-apps"), Primary],
            Self::ProjectAppDetail => &[Literal("project-app"), Primary, Secondary],
        }
    }

    #[must_use]
    pub fn required_params(self) -> usize {
        self.template()
            .iter()
            .filter(|segment| !matches!(segment, Literal(_)))
            .count()
    }

    #[must_use]
    pub fn literal_count(self) -> usize {
        self.template().len() - self.required_params()
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Incidents => "Incidents",
            Self::IncidentNew => "New incident",
            Self::IncidentDetail => "Incident",
            Self::IncidentEdit
            | Self::ChangeRequestEdit
            | Self::ProjectEdit => "Edit",
            Self::ChangeRequests => "Change requests",
            Self::ChangeRequestNew => "New change request",
            Self::ChangeRequestDetail => "Change request",
            Self::RiskRegisters => "Risk registers",
            Self::RiskRegisterDetail => "Risk",
            Self::MonitoringDashboards => "Monitoring dashboards",
            Self::PasswordVault => "Password vault",
            Self::PasswordEntryDetail => "Vault entry",
            Self::Projects => "Projects",
            Self::ProjectNew => "New project",
            Self::ProjectDetail => "Project",
            Self::ProjectApps => "Applications",
            Self::AppDetail | Self::ProjectAppDetail => "Application",
        }
    }

    /// The screen one level up, used for breadcrumbs and "back to list" links.
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Dashboard => None,
            Self::Incidents
            | Self::ChangeRequests
            | Self::RiskRegisters
            | Self::MonitoringDashboards
            | Self::PasswordVault
            | Self::Projects => Some(Self::Dashboard),
            Self::IncidentNew | Self::IncidentDetail => Some(Self::Incidents),
            Self::IncidentEdit => Some(Self::IncidentDetail),
            Self::ChangeRequestNew | Self::ChangeRequestDetail => Some(Self::ChangeRequests),
            Self::ChangeRequestEdit => Some(Self::ChangeRequestDetail),
            Self::RiskRegisterDetail => Some(Self::RiskRegisters),
            Self::PasswordEntryDetail => Some(Self::PasswordVault),
            Self::ProjectNew | Self::ProjectDetail | Self::ProjectApps => Some(Self::Projects),
            Self::ProjectEdit | Self::ProjectAppDetail => Some(Self::ProjectDetail),
            Self::AppDetail => Some(Self::ProjectApps),
        }
    }

    /// Backend collection the screen reads from, if any.
    #[must_use]
    pub const fn resource(self) -> Option<Resource> {
        match self {
            Self::Dashboard => None,
            Self::Incidents | Self::IncidentNew | Self::IncidentDetail | Self::IncidentEdit => {
                Some(Resource::Incidents)
            }
            Self::ChangeRequests
            | Self::ChangeRequestNew
            | Self::ChangeRequestDetail
            | Self::ChangeRequestEdit => Some(Resource::ChangeRequests),
            Self::RiskRegisters | Self::RiskRegisterDetail => Some(Resource::RiskRegisters),
            Self::MonitoringDashboards => Some(Resource::MonitoringDashboards),
            Self::PasswordVault | Self::PasswordEntryDetail => Some(Resource::PasswordVault),
            Self::Projects | Self::ProjectNew | Self::ProjectDetail | Self::ProjectEdit => {
                Some(Resource::Projects)
            }
            Self::ProjectApps | Self::AppDetail | Self::ProjectAppDetail => {
                Some(Resource::ProjectApps)
            }
        }
    }

    /// List screens show a collection; everything else addresses one record
    /// or a form.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(
            self,
            Self::Incidents
                | Self::ChangeRequests
                | Self::RiskRegisters
                | Self::MonitoringDashboards
                | Self::PasswordVault
                | Self::Projects
                | Self::ProjectApps
        )
    }

    /// Kind of the detail screen reached from a row of this list, if any.
    #[must_use]
    pub const fn detail_kind(self) -> Option<Self> {
        match self {
            Self::Incidents => Some(Self::IncidentDetail),
            Self::ChangeRequests => Some(Self::ChangeRequestDetail),
            Self::RiskRegisters => Some(Self::RiskRegisterDetail),
            Self::PasswordVault => Some(Self::PasswordEntryDetail),
            Self::Projects => Some(Self::ProjectDetail),
            Self::ProjectApps => Some(Self::AppDetail),
            _ => None,
        }
    }

    /// Kind of the "create" form reachable from this list, if any.
    #[must_use]
    pub const fn create_kind(self) -> Option<Self> {
        match self {
            Self::Incidents => Some(Self::IncidentNew),
            Self::ChangeRequests => Some(Self::ChangeRequestNew),
            Self::Projects => Some(Self::ProjectNew),
            _ => None,
        }
    }

    /// Kind of the edit form for this detail screen, if any.
    #[must_use]
    pub const fn edit_kind(self) -> Option<Self> {
        match self {
            Self::IncidentDetail => Some(Self::IncidentEdit),
            Self::ChangeRequestDetail => Some(Self::ChangeRequestEdit),
            Self::ProjectDetail => Some(Self::ProjectEdit),
            _ => None,
        }
    }
}

/// The logical screen currently shown: a kind plus the ids its template
/// needs. Ids are only ever present when the kind takes them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Route {
    kind: RouteKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secondary_id: Option<String>,
}

impl Route {
    /// The fallback for unknown names and unparseable fragments.
    #[must_use]
    pub fn dashboard() -> Self {
        Self::default()
    }

    /// Build a route, checking the ids against the kind's template.
    ///
    /// Ids the template does not use are dropped.
    ///
    /// # Errors
    /// Returns [`RouteError::MissingId`] when the template needs more ids than
    /// supplied, or [`RouteError::InvalidId`] when a needed id cannot appear
    /// in a fragment.
    pub fn try_new(
        kind: RouteKind,
        primary_id: Option<&str>,
        secondary_id: Option<&str>,
    ) -> Result<Self, RouteError> {
        let expected = kind.required_params();
        let supplied = [primary_id, secondary_id];
        let found = supplied.iter().take(expected).flatten().count();
        if found < expected {
            return Err(RouteError::MissingId {
                route: kind.name(),
                expected,
                found,
            });
        }
        let surplus = supplied.iter().skip(expected).flatten().count();
        if surplus > 0 {
            log::debug!("dropping {surplus} id(s) not used by route `{}`", kind.name());
        }

        let primary_id = if expected >= 1 {
            primary_id.map(validate_id).transpose()?
        } else {
            None
        };
        let secondary_id = if expected >= 2 {
            secondary_id.map(validate_id).transpose()?
        } else {
            None
        };

        Ok(Self {
            kind,
            primary_id,
            secondary_id,
        })
    }

    #[must_use]
    pub const fn kind(&self) -> RouteKind {
        self.kind
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[must_use]
    pub fn primary_id(&self) -> Option<&str> {
        self.primary_id.as_deref()
    }

    #[must_use]
    pub fn secondary_id(&self) -> Option<&str> {
        self.secondary_id.as_deref()
    }

    /// Encode the route into its fragment (no leading `#`). Ids are
    /// percent-encoded so the browser reports them back unchanged.
    #[must_use]
    pub fn fragment(&self) -> String {
        self.kind
            .template()
            .iter()
            .map(|segment| match segment {
                Literal(text) => Cow::Borrowed(*text),
                Primary => urlencoding::encode(self.primary_id.as_deref().unwrap_or_default()),
                Secondary => urlencoding::encode(self.secondary_id.as_deref().unwrap_or_default()),
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// `#`-prefixed form suitable for an `href`.
    #[must_use]
    pub fn href(&self) -> String {
        format!("#{}", self.fragment())
    }

    /// One level up, carrying the ids the parent template still needs.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let parent = self.kind.parent()?;
        Self::try_new(
            parent,
            self.primary_id.as_deref(),
            self.secondary_id.as_deref(),
        )
        .ok()
    }

    /// Human label for breadcrumbs and headings. Record screens are labelled
    /// by the id they address.
    #[must_use]
    pub fn label(&self) -> String {
        match self.kind {
            RouteKind::ProjectAppDetail => self.secondary_id.clone(),
            kind if kind.required_params() == 1 && kind.edit_kind().is_some() => {
                self.primary_id.clone()
            }
            RouteKind::RiskRegisterDetail
            | RouteKind::PasswordEntryDetail
            | RouteKind::AppDetail => self.primary_id.clone(),
            _ => None,
        }
        .unwrap_or_else(|| self.kind.title().to_string())
    }
}

/// Ids are opaque but must survive a trip through the fragment unchanged.
///
/// # Errors
/// Returns [`RouteError::InvalidId`] for empty ids or ids containing
/// separators or whitespace.
pub fn validate_id(id: &str) -> Result<String, RouteError> {
    let invalid = id.is_empty()
        || id
            .chars()
            .any(|c| matches!(c, '/' | '#' | '?') || c.is_whitespace());
    if invalid {
        Err(RouteError::InvalidId(id.to_string()))
    } else {
        Ok(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_resolvable() {
        for kind in RouteKind::ALL {
            assert_eq!(RouteKind::from_name(kind.name()), Some(kind));
            let same = RouteKind::ALL
                .iter()
                .filter(|other| other.name() == kind.name())
                .count();
            assert_eq!(same, 1, "duplicate name {}", kind.name());
        }
        assert_eq!(RouteKind::from_name("nope"), None);
    }

    #[test]
    fn templates_are_distinct() {
        for kind in RouteKind::ALL {
            for other in RouteKind::ALL {
                if kind != other {
                    assert_ne!(kind.template(), other.template());
                }
            }
        }
    }

    #[test]
    fn required_params_follow_templates() {
        assert_eq!(RouteKind::Dashboard.required_params(), 0);
        assert_eq!(RouteKind::IncidentEdit.required_params(), 1);
        assert_eq!(RouteKind::IncidentEdit.literal_count(), 2);
        assert_eq!(RouteKind::ProjectAppDetail.required_params(), 2);
    }

    #[test]
    fn try_new_rejects_missing_ids() {
        let err = Route::try_new(RouteKind::IncidentDetail, None, None).unwrap_err();
        assert_eq!(
            err,
            RouteError::MissingId {
                route: "incident-detail",
                expected: 1,
                found: 0
            }
        );
        let err = Route::try_new(RouteKind::ProjectAppDetail, Some("PROJ-1"), None).unwrap_err();
        assert!(matches!(err, RouteError::MissingId { found: 1, .. }));
    }

    #[test]
    fn try_new_drops_surplus_ids() {
        let route = Route::try_new(RouteKind::Incidents, Some("INC-1"), Some("x")).unwrap();
        assert_eq!(route.primary_id(), None);
        assert_eq!(route.secondary_id(), None);
        let route = Route::try_new(RouteKind::ProjectDetail, Some("P"), Some("x")).unwrap();
        assert_eq!(route.primary_id(), Some("P"));
        assert_eq!(route.secondary_id(), None);
    }

    #[test]
    fn try_new_rejects_ids_that_break_fragments() {
        for bad in ["", "a/b", "a#b", "a b", "a?b"] {
            assert!(matches!(
                Route::try_new(RouteKind::IncidentDetail, Some(bad), None),
                Err(RouteError::InvalidId(_))
            ));
        }
    }

    #[test]
    fn ids_are_percent_encoded_in_fragments() {
        let route = Route::try_new(RouteKind::IncidentDetail, Some("INC<é>"), None).unwrap();
        assert_eq!(route.fragment(), "incident/INC%3C%C3%A9%3E");
        let pct = Route::try_new(RouteKind::IncidentDetail, Some("50%"), None).unwrap();
        assert_eq!(pct.fragment(), "incident/50%25");
    }

    #[test]
    fn fragments_follow_templates() {
        let edit = Route::try_new(RouteKind::IncidentEdit, Some("INC-003"), None).unwrap();
        assert_eq!(edit.fragment(), "incident/INC-003/edit");
        assert_eq!(edit.href(), "#incident/INC-003/edit");
        let nested =
            Route::try_new(RouteKind::ProjectAppDetail, Some("PROJ-001"), Some("app-9")).unwrap();
        assert_eq!(nested.fragment(), "project-app/PROJ-001/app-9");
        assert_eq!(Route::dashboard().fragment(), "dashboard");
    }

    #[test]
    fn parents_carry_needed_ids() {
        let edit = Route::try_new(RouteKind::IncidentEdit, Some("INC-003"), None).unwrap();
        let detail = edit.parent().unwrap();
        assert_eq!(detail.kind(), RouteKind::IncidentDetail);
        assert_eq!(detail.primary_id(), Some("INC-003"));
        let list = detail.parent().unwrap();
        assert_eq!(list.kind(), RouteKind::Incidents);
        assert_eq!(list.primary_id(), None);
        assert_eq!(Route::dashboard().parent(), None);
    }

    #[test]
    fn every_kind_reaches_the_dashboard() {
        for kind in RouteKind::ALL {
            let mut current = Some(kind);
            let mut hops = 0;
            while let Some(step) = current {
                if step == RouteKind::Dashboard {
                    break;
                }
                current = step.parent();
                hops += 1;
                assert!(hops < 8, "{} never reaches dashboard", kind.name());
            }
            assert_eq!(current, Some(RouteKind::Dashboard));
        }
    }

    #[test]
    fn labels_prefer_ids_for_records() {
        let detail = Route::try_new(RouteKind::IncidentDetail, Some("INC-003"), None).unwrap();
        assert_eq!(detail.label(), "INC-003");
        let edit = Route::try_new(RouteKind::IncidentEdit, Some("INC-003"), None).unwrap();
        assert_eq!(edit.label(), "Edit");
        let app = Route::try_new(RouteKind::AppDetail, Some("app-001"), None).unwrap();
        assert_eq!(app.label(), "app-001");
        assert_eq!(Route::dashboard().label(), "Dashboard");
    }

    #[test]
    fn list_helpers_point_at_related_screens() {
        assert_eq!(
            RouteKind::Incidents.detail_kind(),
            Some(RouteKind::IncidentDetail)
        );
        assert_eq!(
            RouteKind::Incidents.create_kind(),
            Some(RouteKind::IncidentNew)
        );
        assert_eq!(
            RouteKind::ProjectDetail.edit_kind(),
            Some(RouteKind::ProjectEdit)
        );
        assert!(RouteKind::ProjectApps.is_list());
        assert!(!RouteKind::AppDetail.is_list());
        assert_eq!(RouteKind::MonitoringDashboards.detail_kind(), None);
    }
}
