use crate::models::PageDescriptor;

/// PageSpec
///
/// A static entry in the page table: the path a page is served at and the REST
/// endpoints its client code loads.
#[derive(Debug, Clone, Copy)]
pub struct PageSpec {
    pub path: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub data_endpoints: &'static [&'static str],
}

impl PageSpec {
    pub fn descriptor(&self) -> PageDescriptor {
        PageDescriptor {
            name: self.name.to_string(),
            title: self.title.to_string(),
            data_endpoints: self.data_endpoints.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Pages only reachable without a session.
pub const ENTRY_PAGES: &[PageSpec] = &[
    PageSpec {
        path: "/login",
        name: "login",
        title: "Sign in",
        data_endpoints: &[],
    },
    PageSpec {
        path: "/register",
        name: "register",
        title: "Create account",
        data_endpoints: &[],
    },
];

/// The back-office pages.
pub const DASHBOARD_PAGES: &[PageSpec] = &[
    PageSpec {
        path: "/dashboard",
        name: "dashboard",
        title: "Dashboard",
        data_endpoints: &[],
    },
    PageSpec {
        path: "/data",
        name: "tables",
        title: "Tables",
        data_endpoints: &["/api/tables"],
    },
    PageSpec {
        path: "/analytics",
        name: "analytics",
        title: "Analytics",
        data_endpoints: &[],
    },
    PageSpec {
        path: "/categories",
        name: "categories",
        title: "Categories",
        data_endpoints: &["/api/categories"],
    },
    PageSpec {
        path: "/products",
        name: "products",
        title: "Products",
        data_endpoints: &["/api/products"],
    },
    PageSpec {
        path: "/ingredients",
        name: "ingredients",
        title: "Ingredients",
        data_endpoints: &["/api/ingredients"],
    },
    PageSpec {
        path: "/reports",
        name: "reports",
        title: "Stock reports",
        data_endpoints: &["/api/stock/report", "/api/stock/history"],
    },
];

/// Looks a page up by name across both tables.
pub fn find(name: &str) -> Option<&'static PageSpec> {
    ENTRY_PAGES
        .iter()
        .chain(DASHBOARD_PAGES)
        .find(|page| page.name == name)
}
