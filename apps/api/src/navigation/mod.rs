//! Navigation model: the sidebar's section tree as a pure function of
//! tenant, role and subscription plan.
//!
//! Nothing here touches I/O. The same `(tenant, role, plan)` always produces
//! the same sections in the same order. Unknown roles and plans are not
//! errors: they land on the most restrictive branch.

use serde::Serialize;

use crate::models::tenant::{PlanTier, TenantId};
use crate::models::user::Role;

/// Symbolic icon identifiers. Renderers map these to whatever icon set
/// they ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    BriefcaseMedical,
    Calendar,
    Stethoscope,
    BookUser,
    PiggyBank,
    LayoutDashboard,
    FileText,
    ClipboardList,
    Package,
    CircleUserRound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub icon: Icon,
    pub label: &'static str,
    pub path: String,
    /// Locked items stay visible but open the "not available yet" notice.
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSection {
    pub icon: Icon,
    pub label: &'static str,
    pub items: Vec<NavItem>,
}

pub const MEDICAL: &str = "Medical";
pub const FINANCIAL: &str = "Financial";
pub const MANAGEMENT: &str = "Management";

fn item(tenant: &TenantId, icon: Icon, label: &'static str, page: &str) -> NavItem {
    NavItem {
        icon,
        label,
        path: format!("/{tenant}/{page}"),
        locked: false,
    }
}

fn medical_section(tenant: &TenantId, role: Role, plan: PlanTier) -> NavSection {
    let mut items = vec![
        item(tenant, Icon::Calendar, "Appointments", "appointments"),
        item(tenant, Icon::Stethoscope, "Procedure Management", "procedures"),
    ];
    if role.sees_patients() && plan.includes_patients() {
        items.push(item(tenant, Icon::BookUser, "Patients", "patients"));
    }
    NavSection {
        icon: Icon::BriefcaseMedical,
        label: MEDICAL,
        items,
    }
}

fn financial_section(tenant: &TenantId) -> NavSection {
    NavSection {
        icon: Icon::PiggyBank,
        label: FINANCIAL,
        items: vec![
            item(tenant, Icon::LayoutDashboard, "Dashboard", "financeiro"),
            item(tenant, Icon::FileText, "Expenses", "despesas"),
            item(tenant, Icon::PiggyBank, "Income", "receitas"),
        ],
    }
}

fn management_section(tenant: &TenantId, plan: PlanTier) -> NavSection {
    let mut items = Vec::with_capacity(2);
    if plan.includes_stock() {
        items.push(item(tenant, Icon::Package, "Stock Management", "stock"));
    }
    items.push(item(
        tenant,
        Icon::CircleUserRound,
        "User Management",
        "users",
    ));
    NavSection {
        icon: Icon::ClipboardList,
        label: MANAGEMENT,
        items,
    }
}

/// Builds the ordered navigation sections for a user.
///
/// - admin / owner: Financial, Medical, Management
/// - everyone else (including unrecognized roles): Medical only
pub fn build_navigation(tenant: &TenantId, role: Role, plan: PlanTier) -> Vec<NavSection> {
    let medical = medical_section(tenant, role, plan);
    if role.is_manager() {
        vec![
            financial_section(tenant),
            medical,
            management_section(tenant, plan),
        ]
    } else {
        vec![medical]
    }
}

/// Finds an item anywhere in the tree by its path.
pub fn find_item<'a>(sections: &'a [NavSection], path: &str) -> Option<&'a NavItem> {
    sections
        .iter()
        .flat_map(|s| s.items.iter())
        .find(|i| i.path == path)
}
