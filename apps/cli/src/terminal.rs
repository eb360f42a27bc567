//! Terminal implementations of the navigation and preview surfaces.

use client_core::{Navigator, ReceiptModal, ReceiptPreview, Route};
use tokio::sync::watch;

pub struct TerminalNavigator {
    route: watch::Sender<Route>,
}

impl TerminalNavigator {
    pub fn new(initial: Route) -> Self {
        let (route, _) = watch::channel(initial);
        Self { route }
    }

    pub fn current(&self) -> Route {
        *self.route.borrow()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(route = route.path(), "navigate");
        self.route.send_replace(route);
    }
}

pub struct TerminalModal {
    width: u32,
}

impl TerminalModal {
    pub fn new(width: u32) -> Self {
        Self { width }
    }
}

impl ReceiptModal for TerminalModal {
    fn width(&self) -> u32 {
        self.width
    }

    fn show(&self, preview: ReceiptPreview) {
        println!("Justificatif ({}px): {}", preview.width, preview.url);
    }
}
