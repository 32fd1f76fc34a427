use crate::{
    cmd::{create_annotator, ensure_user_id},
    modules::{annotator::Annotator, render::render_table},
};
use anyhow::Result;
use atcoder_intime_libs::{
    Classification, PassTicket, PassTracker, ProblemsApi, RetrievalFailure,
};
use clap::Args;
use std::{future::Future, sync::Arc};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
    time::{self, Duration, MissedTickBehavior},
};
use tokio_stream::{
    wrappers::{IntervalStream, LinesStream},
    Stream, StreamExt,
};

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// User to classify before anything is read from stdin
    #[arg(long)]
    user: Option<String>,
    /// Seconds between refreshes of the current user
    #[arg(long, default_value_t = 300)]
    interval: u64,
}

#[derive(Debug)]
pub enum Trigger {
    Navigate(String),
    Refresh,
}

/// The classification currently shown.
///
/// A failed pass keeps the previous one on screen.
#[derive(Debug, Default)]
pub struct View {
    shown: Option<Classification>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ViewUpdate {
    Changed,
    Unchanged,
    Kept,
}

impl View {
    pub fn apply(&mut self, result: Result<Classification, RetrievalFailure>) -> ViewUpdate {
        match result {
            Ok(classification) => {
                if self.shown.as_ref() == Some(&classification) {
                    ViewUpdate::Unchanged
                } else {
                    self.shown = Some(classification);
                    ViewUpdate::Changed
                }
            }
            Err(e) => {
                tracing::error!("pass failed, previous annotations are kept: {}", e);
                ViewUpdate::Kept
            }
        }
    }

    pub fn shown(&self) -> Option<&Classification> {
        self.shown.as_ref()
    }
}

type PassResult = (PassTicket, Result<Classification, RetrievalFailure>);

/// Re-runs the annotator whenever a trigger arrives.
///
/// Navigation always starts a new pass and makes any running one stale.
/// A refresh is skipped while a pass is still running.
pub struct Watcher<A> {
    annotator: Arc<Annotator<A>>,
    tracker: PassTracker,
    in_flight: Option<PassTicket>,
    current_user: Option<String>,
    view: View,
}

impl<A> Watcher<A>
where
    A: ProblemsApi + Send + Sync + 'static,
{
    pub fn new(annotator: Annotator<A>, user: Option<String>) -> Self {
        Watcher {
            annotator: Arc::new(annotator),
            tracker: PassTracker::new(),
            in_flight: None,
            current_user: user,
            view: View::default(),
        }
    }

    pub async fn run<S, F, C>(&mut self, triggers: S, shutdown: F, mut on_change: C)
    where
        S: Stream<Item = Trigger>,
        F: Future<Output = ()>,
        C: FnMut(&Classification),
    {
        let (tx, mut rx) = mpsc::channel::<PassResult>(16);
        tokio::pin!(triggers);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                Some(trigger) = triggers.next() => self.dispatch(trigger, &tx),
                Some((ticket, result)) = rx.recv() => {
                    if let Some(classification) = self.receive(ticket, result) {
                        on_change(classification);
                    }
                }
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, stop watching.");
                    break;
                }
            }
        }
    }

    fn dispatch(&mut self, trigger: Trigger, tx: &mpsc::Sender<PassResult>) {
        match trigger {
            Trigger::Navigate(user) => {
                if user.is_empty() || ensure_user_id(&user).is_err() {
                    return;
                }
                tracing::info!("Switch to user {}", user);
                self.current_user = Some(user);
            }
            Trigger::Refresh => {
                if let Some(ticket) = self.in_flight {
                    tracing::info!("Pass {:?} is still running, skip this refresh.", ticket);
                    return;
                }
            }
        }

        let Some(user) = self.current_user.clone() else {
            return;
        };
        let ticket = self.tracker.begin();
        self.in_flight = Some(ticket);

        let annotator = self.annotator.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = annotator.annotate(&user).await;
            if tx.send((ticket, result)).await.is_err() {
                tracing::warn!("watcher is already closed, result for {} is dropped", user);
            }
        });
    }

    /// Returns the classification to print when the view changed.
    fn receive(
        &mut self,
        ticket: PassTicket,
        result: Result<Classification, RetrievalFailure>,
    ) -> Option<&Classification> {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }
        let result = self.tracker.settle(ticket, result)?;

        match self.view.apply(result) {
            ViewUpdate::Changed => self.view.shown(),
            ViewUpdate::Unchanged => {
                tracing::info!("Annotations are unchanged.");
                None
            }
            ViewUpdate::Kept => None,
        }
    }
}

/// Reads one user id per line from stdin and classifies again on each.
///
/// The current user is also refreshed at a fixed interval.
pub async fn run(args: WatchArgs) -> Result<()> {
    if let Some(user) = &args.user {
        ensure_user_id(user)?;
    }
    let annotator = create_annotator()?;

    let lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines()).filter_map(|line| {
        match line {
            Ok(line) => Some(Trigger::Navigate(line.trim().to_string())),
            Err(e) => {
                tracing::error!("failed to read stdin: {:?}", e);
                None
            }
        }
    });
    let mut interval = time::interval(Duration::from_secs(args.interval.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let ticks = IntervalStream::new(interval).map(|_| Trigger::Refresh);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {:?}", e);
        }
    };

    let mut watcher = Watcher::new(annotator, args.user);
    watcher
        .run(lines.merge(ticks), shutdown, |classification| {
            println!("# {}", classification.user_id);
            print!("{}", render_table(classification));
        })
        .await;

    Ok(())
}
