//! A page session: dispatcher, host document and fetcher wired together.

use crate::config::Config;
use crate::followup::Followup;
use crate::host::Host;
use crate::keys::KeyEvent;
use crate::net::FragmentFetcher;
use crate::platform::PlatformMode;
use crate::shortcuts::{Dispatch, Dispatcher, Verdict};

pub struct Session<H, F> {
    dispatcher: Dispatcher,
    host: H,
    fetcher: F,
}

impl<H: Host, F: FragmentFetcher> Session<H, F> {
    /// Start a session. The platform convention is resolved here, once.
    pub fn new(host: H, fetcher: F, config: &Config) -> Self {
        let reported = config.platform.clone().or_else(|| host.platform());
        let mode = PlatformMode::detect(reported.as_deref());
        tracing::info!(?mode, "keyboard shortcuts active");
        Self {
            dispatcher: Dispatcher::new(mode, config.timing.clone()),
            host,
            fetcher,
        }
    }

    pub fn mode(&self) -> PlatformMode {
        self.dispatcher.mode()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Dispatch an event without running its follow-up.
    pub fn dispatch(&mut self, event: &KeyEvent) -> Dispatch {
        self.dispatcher.handle(&mut self.host, event)
    }

    /// Run a follow-up returned by [`Session::dispatch`].
    pub async fn settle(&mut self, followup: Followup) {
        followup.complete(&mut self.host, &self.fetcher).await;
    }

    /// Dispatch an event and wait for any follow-up to finish.
    pub async fn key(&mut self, event: &KeyEvent) -> Verdict {
        let Dispatch { verdict, followup } = self.dispatch(event);
        if let Some(followup) = followup {
            self.settle(followup).await;
        }
        verdict
    }

    pub fn close_overlay(&mut self) {
        self.dispatcher.close_overlay(&mut self.host);
    }
}
