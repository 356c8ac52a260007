/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 *
 * 2024 Tendsin Mende
 */

//! Optimization remarks. Passes emit them to a [RemarkSink], which decides what happens to them.
//! Emitting a remark never influences the pass itself.

use std::fmt::Display;

use ariadne::{Label, Report, ReportKind, Source};
use gir::{InstRef, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemarkKind {
    ///An optimization was not applied.
    Missed,
    ///An optimization was applied.
    Passed,
}

#[derive(Debug, Clone)]
pub struct Remark {
    ///Name of the emitting pass.
    pub pass: &'static str,
    ///Short, stable identifier, for instance `NoDef`.
    pub identifier: &'static str,
    pub kind: RemarkKind,
    ///The instruction the remark is about.
    pub inst: InstRef,
    pub message: String,
    pub span: Option<Span>,
}

impl Remark {
    pub fn missed(
        pass: &'static str,
        identifier: &'static str,
        inst: InstRef,
        message: impl ToString,
    ) -> Self {
        Remark {
            pass,
            identifier,
            kind: RemarkKind::Missed,
            inst,
            message: message.to_string(),
            span: None,
        }
    }

    pub fn passed(
        pass: &'static str,
        identifier: &'static str,
        inst: InstRef,
        message: impl ToString,
    ) -> Self {
        Remark {
            kind: RemarkKind::Passed,
            ..Self::missed(pass, identifier, inst, message)
        }
    }

    pub fn with_span(mut self, span: Option<Span>) -> Self {
        self.span = span;
        self
    }

    ///Prints the remark to stderr. If the remark carries a span, and the source file can be read, the
    /// source location is rendered as well.
    pub fn report(&self) {
        let Some(span) = &self.span else {
            eprintln!("{self}");
            return;
        };
        let src = match std::fs::read_to_string(&span.file) {
            Ok(src) => src,
            Err(_e) => {
                #[cfg(feature = "log")]
                log::warn!("could not read {} for remark: {_e}", span.file);
                eprintln!("{self}");
                return;
            }
        };

        let kind = match self.kind {
            RemarkKind::Missed => ReportKind::Warning,
            RemarkKind::Passed => ReportKind::Advice,
        };
        let file = span.file.as_str();
        let result = Report::build(kind, file, span.byte_start)
            .with_config(ariadne::Config::default().with_index_type(ariadne::IndexType::Byte))
            .with_code(self.identifier)
            .with_message(&self.message)
            .with_label(Label::new((file, span.range())).with_message(self.pass))
            .finish()
            .eprint((file, Source::from(src)));
        if let Err(_e) = result {
            #[cfg(feature = "log")]
            log::error!("failed to print remark: {_e}");
        }
    }
}

impl Display for Remark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            RemarkKind::Missed => "missed",
            RemarkKind::Passed => "passed",
        };
        write!(
            f,
            "[{}] {kind} {}: {}",
            self.pass, self.identifier, self.message
        )
    }
}

///Receiver of optimization remarks. Must not fail.
pub trait RemarkSink {
    fn emit(&mut self, remark: Remark);
}

impl<T: RemarkSink + ?Sized> RemarkSink for &mut T {
    fn emit(&mut self, remark: Remark) {
        (**self).emit(remark)
    }
}

///Drops all remarks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRemarks;

impl RemarkSink for NoRemarks {
    fn emit(&mut self, _remark: Remark) {}
}

///Forwards remarks to the `log` facade. Missed optimizations are warnings, applied ones are info.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRemarks;

impl RemarkSink for LogRemarks {
    fn emit(&mut self, _remark: Remark) {
        #[cfg(feature = "log")]
        match _remark.kind {
            RemarkKind::Missed => log::warn!("{_remark}"),
            RemarkKind::Passed => log::info!("{_remark}"),
        }
    }
}

///Keeps all remarks, so the host can report them later.
#[derive(Debug, Default, Clone)]
pub struct RemarkCollector {
    pub remarks: Vec<Remark>,
}

impl RemarkCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identifier<'a>(&'a self, identifier: &'a str) -> impl Iterator<Item = &'a Remark> {
        self.remarks
            .iter()
            .filter(move |r| r.identifier == identifier)
    }

    pub fn report_all(&self) {
        for remark in &self.remarks {
            remark.report();
        }
    }
}

impl RemarkSink for RemarkCollector {
    fn emit(&mut self, remark: Remark) {
        self.remarks.push(remark);
    }
}
