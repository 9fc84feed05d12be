//! Named navigation actions used by the feature screens. Each binds a fixed
//! route kind; the store handles fallback for bad ids.

use crate::route::{Route, RouteKind};
use crate::store::{FragmentSink, RouteStore};

impl<S: FragmentSink> RouteStore<S> {
    pub fn go_to_dashboard(&mut self) -> &Route {
        self.navigate_kind(RouteKind::Dashboard, None, None)
    }

    /// Go one level up from the current screen; the dashboard stays put.
    pub fn go_to_parent(&mut self) -> &Route {
        match self.current().parent() {
            Some(parent) => self.navigate(parent),
            None => self.go_to_dashboard(),
        }
    }

    // Incidents

    pub fn go_to_incidents_list(&mut self) -> &Route {
        self.navigate_kind(RouteKind::Incidents, None, None)
    }

    pub fn create_incident(&mut self) -> &Route {
        self.navigate_kind(RouteKind::IncidentNew, None, None)
    }

    pub fn view_incident(&mut self, id: &str) -> &Route {
        self.navigate_kind(RouteKind::IncidentDetail, Some(id), None)
    }

    pub fn edit_incident(&mut self, id: &str) -> &Route {
        self.navigate_kind(RouteKind::IncidentEdit, Some(id), None)
    }

    // Change requests

    pub fn go_to_change_requests_list(&mut self) -> &Route {
        self.navigate_kind(RouteKind::ChangeRequests, None, None)
    }

    pub fn create_change_request(&mut self) -> &Route {
        self.navigate_kind(RouteKind::ChangeRequestNew, None, None)
    }

    pub fn view_change_request(&mut self, id: &str) -> &Route {
        self.navigate_kind(RouteKind::ChangeRequestDetail, Some(id), None)
    }

    pub fn edit_change_request(&mut self, id: &str) -> &Route {
        self.navigate_kind(RouteKind::ChangeRequestEdit, Some(id), None)
    }

    // Risk registers

    pub fn go_to_risk_registers_list(&mut self) -> &Route {
        self.navigate_kind(RouteKind::RiskRegisters, None, None)
    }

    pub fn view_risk_register(&mut self, id: &str) -> &Route {
        self.navigate_kind(RouteKind::RiskRegisterDetail, Some(id), None)
    }

    // Monitoring dashboards

    pub fn go_to_monitoring_dashboards(&mut self) -> &Route {
        self.navigate_kind(RouteKind::MonitoringDashboards, None, None)
    }

    // Password vault

    pub fn go_to_password_vault(&mut self) -> &Route {
        self.navigate_kind(RouteKind::PasswordVault, None, None)
    }

    pub fn view_password_entry(&mut self, id: &str) -> &Route {
        self.navigate_kind(RouteKind::PasswordEntryDetail, Some(id), None)
    }

    // Projects

    pub fn go_to_projects_list(&mut self) -> &Route {
        self.navigate_kind(RouteKind::Projects, None, None)
    }

    pub fn create_project(&mut self) -> &Route {
        self.navigate_kind(RouteKind::ProjectNew, None, None)
    }

    pub fn view_project(&mut self, id: &str) -> &Route {
        self.navigate_kind(RouteKind::ProjectDetail, Some(id), None)
    }

    pub fn edit_project(&mut self, id: &str) -> &Route {
        self.navigate_kind(RouteKind::ProjectEdit, Some(id), None)
    }

    pub fn go_to_project_apps(&mut self) -> &Route {
        self.navigate_kind(RouteKind::ProjectApps, None, None)
    }

    pub fn view_app(&mut self, app_id: &str) -> &Route {
        self.navigate_kind(RouteKind::AppDetail, Some(app_id), None)
    }

    pub fn view_project_app(&mut self, project_id: &str, app_id: &str) -> &Route {
        self.navigate_kind(
            RouteKind::ProjectAppDetail,
            Some(project_id),
            Some(app_id),
        )
    }
}
