//! Layout actions

pub const OPEN_SIDENAV: &str = "[Layout] Open Sidenav";
pub const CLOSE_SIDENAV: &str = "[Layout] Close Sidenav";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutAction {
    OpenSidenav,
    CloseSidenav,
}

impl LayoutAction {
    pub fn kind(&self) -> &'static str {
        match self {
            LayoutAction::OpenSidenav => OPEN_SIDENAV,
            LayoutAction::CloseSidenav => CLOSE_SIDENAV,
        }
    }
}
