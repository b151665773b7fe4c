//! Shared helpers for pants-init tests

#![allow(dead_code)]

use pants_init::{BootstrapSession, FlagErrorHelp, HelpPrinter};
use pants_extensions::SearchPath;
use pants_options::{Options, UnknownFlagsError};
use pants_test_utils::CountingActivator;
use std::sync::{Arc, Mutex};

/// Computes the diagnostic without printing it and records every call.
#[derive(Default)]
pub struct RecordingHelpPrinter {
    calls: Mutex<Vec<(UnknownFlagsError, FlagErrorHelp)>>,
}

impl RecordingHelpPrinter {
    pub fn calls(&self) -> Vec<(UnknownFlagsError, FlagErrorHelp)> {
        self.calls.lock().unwrap().clone()
    }
}

impl HelpPrinter for RecordingHelpPrinter {
    fn handle_unknown_flags(&self, options: &Options, error: &UnknownFlagsError) -> FlagErrorHelp {
        let help = FlagErrorHelp::compute(options, error);
        self.calls.lock().unwrap().push((error.clone(), help.clone()));
        help
    }
}

/// A session with counting/recording doubles and an empty search path.
pub struct Harness {
    pub session: BootstrapSession,
    pub activator: Arc<CountingActivator>,
    pub printer: Arc<RecordingHelpPrinter>,
    pub loader: Arc<SearchPath>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_activator(CountingActivator::new())
    }

    pub fn with_activator(activator: CountingActivator) -> Self {
        let activator = Arc::new(activator);
        let printer = Arc::new(RecordingHelpPrinter::default());
        let loader = Arc::new(SearchPath::new());
        let session = BootstrapSession::builder()
            .activator(activator.clone())
            .help_printer(printer.clone())
            .loader(loader.clone())
            .build();
        Self {
            session,
            activator,
            printer,
            loader,
        }
    }
}
