// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::{Arc, Mutex};

use tracing::span::{Attributes, Id};
use tracing::subscriber::DefaultGuard;
use tracing::Subscriber;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

/// Records the name of every span opened while it is the default subscriber
#[derive(Clone, Default)]
pub struct SpanRecorder {
    names: Arc<Mutex<Vec<&'static str>>>,
}

impl SpanRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install for the current thread; use with a current-thread runtime.
    pub fn set_default(&self) -> DefaultGuard {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
    }

    pub fn count(&self, name: &str) -> usize {
        self.names.lock().unwrap().iter().filter(|n| **n == name).count()
    }
}

impl<S: Subscriber> Layer<S> for SpanRecorder {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        self.names.lock().unwrap().push(attrs.metadata().name());
    }
}
