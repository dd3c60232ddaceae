//! Selection state shared by every dashboard panel.

use shared::{
    domain::{ActiveTab, Company, CompanyId, UnknownTab, UserStatus},
    error::{FailureContext, FailureNotice},
    protocol::GeneratedContentItem,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    active_tab: ActiveTab,
    selected_company_id: CompanyId,
    user_status: UserStatus,
    companies: Vec<Company>,
    generated_content: Vec<GeneratedContentItem>,
    last_failure: Option<FailureNotice>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tab(&self) -> ActiveTab {
        self.active_tab
    }

    pub fn is_tab_active(&self, tab: ActiveTab) -> bool {
        self.active_tab == tab
    }

    pub fn set_active_tab(&mut self, tab: ActiveTab) {
        self.active_tab = tab;
    }

    /// Parses a tab identifier from the presentation layer. Unknown
    /// identifiers leave the active tab unchanged.
    pub fn select_tab(&mut self, id: &str) -> Result<ActiveTab, UnknownTab> {
        let tab = id.parse::<ActiveTab>()?;
        self.active_tab = tab;
        Ok(tab)
    }

    pub fn selected_company_id(&self) -> &CompanyId {
        &self.selected_company_id
    }

    /// Not checked against `companies`; any id is accepted.
    pub fn set_selected_company(&mut self, id: impl Into<CompanyId>) {
        self.selected_company_id = id.into();
    }

    /// The loaded directory entry for the selected id, if there is one.
    pub fn selected_company(&self) -> Option<&Company> {
        self.companies
            .iter()
            .find(|company| company.id == self.selected_company_id)
    }

    pub fn user_status(&self) -> UserStatus {
        self.user_status
    }

    pub fn set_user_status(&mut self, status: UserStatus) {
        self.user_status = status;
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn set_companies(&mut self, companies: Vec<Company>) {
        self.companies = companies;
    }

    pub fn generated_content(&self) -> &[GeneratedContentItem] {
        &self.generated_content
    }

    pub fn set_generated_content(&mut self, items: Vec<GeneratedContentItem>) {
        self.generated_content = items;
        self.clear_failure(FailureContext::GenerateContent);
    }

    pub fn last_failure(&self) -> Option<&FailureNotice> {
        self.last_failure.as_ref()
    }

    pub fn record_failure(&mut self, notice: FailureNotice) {
        self.last_failure = Some(notice);
    }

    /// Drops the stored notice only if it came from `context`.
    pub fn clear_failure(&mut self, context: FailureContext) {
        if self
            .last_failure
            .as_ref()
            .is_some_and(|notice| notice.context == context)
        {
            self.last_failure = None;
        }
    }
}
