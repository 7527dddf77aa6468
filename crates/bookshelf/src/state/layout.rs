#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutState {
    pub show_sidenav: bool,
}
