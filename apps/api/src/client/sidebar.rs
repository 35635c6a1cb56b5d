//! Sidebar view model: fetches role and plan, builds the navigation tree and
//! keeps the open/expanded state in a [`PreferenceStore`].

use tracing::{error, warn};

use crate::client::preferences::{PreferenceStore, SidebarPreferences};
use crate::client::session_api::SessionApi;
use crate::models::tenant::{PlanTier, TenantId};
use crate::models::user::Role;
use crate::navigation::{build_navigation, find_item, NavItem, NavSection};

pub const BRAND: &str = "Live Plus";

/// Viewports narrower than this are treated as mobile.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// Plan assumed when the subscription response names none.
pub const DEFAULT_PLAN: &str = "plus";

/// What the host already knows about the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarUser {
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// Go to this path.
    Navigate(String),
    /// The item is locked; the "not available yet" notice is now open.
    LockedNotice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarHeader {
    pub brand: &'static str,
    pub home_path: String,
    pub email: Option<String>,
    pub role_label: String,
}

pub struct Sidebar<A: SessionApi, P: PreferenceStore> {
    api: A,
    store: P,
    tenant: TenantId,
    user: SidebarUser,
    prefs: SidebarPreferences,
    role: Option<String>,
    plan: Option<String>,
    navigation: Vec<NavSection>,
    loading: bool,
    is_mobile: bool,
    notice_open: bool,
    current_path: Option<String>,
}

impl<A: SessionApi, P: PreferenceStore> Sidebar<A, P> {
    /// Reads persisted preferences once; nothing is fetched until
    /// [`Sidebar::load`].
    pub fn new(tenant: TenantId, user: SidebarUser, api: A, store: P) -> Self {
        let prefs = SidebarPreferences::load(&store);
        Self {
            api,
            store,
            tenant,
            user,
            prefs,
            role: None,
            plan: None,
            navigation: Vec::new(),
            loading: true,
            is_mobile: false,
            notice_open: false,
            current_path: None,
        }
    }

    /// Resolves role and plan, then rebuilds navigation.
    ///
    /// A role already known from the host is used as is. Fetch failures are
    /// logged and leave the value unknown, which yields the minimal
    /// navigation set.
    pub async fn load(&mut self) {
        self.loading = true;

        self.role = match &self.user.role {
            Some(role) => Some(role.clone()),
            None => match self.api.verify_role(&self.tenant).await {
                Ok(role) => Some(role),
                Err(e) => {
                    warn!("Failed to fetch role for tenant {}: {e}", self.tenant);
                    None
                }
            },
        };

        self.plan = match self.api.plan_type(&self.tenant).await {
            Ok(plan) => Some(plan.unwrap_or_else(|| DEFAULT_PLAN.to_string())),
            Err(e) => {
                warn!("Failed to fetch subscription for tenant {}: {e}", self.tenant);
                None
            }
        };

        self.navigation = build_navigation(&self.tenant, self.role(), self.plan());
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn role(&self) -> Role {
        self.role.as_deref().map_or(Role::Unrecognized, Role::parse)
    }

    pub fn plan(&self) -> PlanTier {
        self.plan
            .as_deref()
            .map_or(PlanTier::Unrecognized, PlanTier::parse)
    }

    pub fn navigation(&self) -> &[NavSection] {
        &self.navigation
    }

    pub fn preferences(&self) -> &SidebarPreferences {
        &self.prefs
    }

    pub fn header(&self) -> SidebarHeader {
        SidebarHeader {
            brand: BRAND,
            home_path: format!("/{}", self.tenant),
            email: self.user.email.clone(),
            role_label: self.role.clone().unwrap_or_default(),
        }
    }

    fn persist(&self) {
        if let Err(e) = self.prefs.save(&self.store) {
            warn!("Failed to persist sidebar preferences: {e}");
        }
    }

    pub fn is_open(&self) -> bool {
        self.prefs.sidebar_open
    }

    pub fn set_open(&mut self, open: bool) {
        self.prefs.sidebar_open = open;
        self.persist();
    }

    pub fn toggle_open(&mut self) {
        self.set_open(!self.prefs.sidebar_open);
    }

    pub fn is_section_open(&self, label: &str) -> bool {
        self.prefs.is_section_open(label)
    }

    pub fn toggle_section(&mut self, label: &str) {
        let open = !self.prefs.is_section_open(label);
        self.prefs.open_sections.insert(label.to_string(), open);
        self.persist();
    }

    pub fn is_mobile(&self) -> bool {
        self.is_mobile
    }

    /// Call on start and on every resize. Entering mobile width closes the
    /// sidebar; leaving it does not reopen it.
    pub fn set_viewport_width(&mut self, width_px: u32) {
        self.is_mobile = width_px < MOBILE_BREAKPOINT_PX;
        if self.is_mobile && self.prefs.sidebar_open {
            self.set_open(false);
        }
    }

    /// Whether the dimmed overlay behind the sidebar is shown.
    pub fn shows_overlay(&self) -> bool {
        self.is_mobile && self.prefs.sidebar_open
    }

    pub fn is_active(&self, item: &NavItem) -> bool {
        !item.locked && self.current_path.as_deref() == Some(item.path.as_str())
    }

    /// The navigation item for the current path, if it is in the tree.
    pub fn active_item(&self) -> Option<&NavItem> {
        self.current_path
            .as_deref()
            .and_then(|path| find_item(&self.navigation, path))
    }

    pub fn set_current_path(&mut self, path: impl Into<String>) {
        self.current_path = Some(path.into());
    }

    pub fn click(&mut self, item: &NavItem) -> NavOutcome {
        if item.locked {
            self.notice_open = true;
            return NavOutcome::LockedNotice;
        }
        self.current_path = Some(item.path.clone());
        if self.is_mobile {
            self.set_open(false);
        }
        NavOutcome::Navigate(item.path.clone())
    }

    pub fn is_notice_open(&self) -> bool {
        self.notice_open
    }

    pub fn dismiss_notice(&mut self) {
        self.notice_open = false;
    }

    /// Ends the session. Returns the login path to redirect to, or `None`
    /// if the server refused.
    pub async fn logout(&self) -> Option<String> {
        match self.api.logout().await {
            Ok(()) => Some(format!("/{}/login", self.tenant)),
            Err(e) => {
                error!("Logout failed: {e}");
                None
            }
        }
    }
}
