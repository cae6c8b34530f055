use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveTime, TimeZone};
use chrono_tz::Tz;
use teloxide::Bot;
use tokio::sync::broadcast;

use crate::{
    runtime::RuntimeError,
    service::reminder::send_reminder,
    state::AppState,
    utils::time::local_now,
};

use super::Worker;

const MAX_LOOKAHEAD_DAYS: i64 = 7;

/// Next instant strictly after `now` whose local wall-clock time is `time`.
pub fn next_fire_after(now: &DateTime<Tz>, time: NaiveTime) -> Result<DateTime<Tz>, RuntimeError> {
    let tz = now.timezone();
    let mut date = now.date_naive();

    for _ in 0..=MAX_LOOKAHEAD_DAYS {
        // a wall-clock time inside a DST gap has no instant, try the next day
        if let Some(candidate) = tz.from_local_datetime(&date.and_time(time)).earliest() {
            if candidate > *now {
                return Ok(candidate);
            }
        }
        date += Duration::days(1);
    }

    Err(RuntimeError::ScheduleError(format!(
        "no valid {} in {} within {} days",
        time,
        tz.name(),
        MAX_LOOKAHEAD_DAYS
    )))
}

#[derive(Clone)]
pub struct ReminderWorker {
    bot: Bot,
    state: AppState,
    time: NaiveTime,
    running: Arc<AtomicBool>,
}

impl ReminderWorker {
    pub fn new(bot: Bot, state: AppState, time: NaiveTime) -> Self {
        Self {
            bot,
            state,
            time,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    async fn fire(&self) {
        if let Err(e) = send_reminder(&self.bot, &self.state).await {
            error!("Failed to send daily reminder: {}", e);
        }
    }
}

#[async_trait]
impl Worker for ReminderWorker {
    fn name(&self) -> &str {
        "reminder"
    }

    async fn start(&self, mut shutdown: broadcast::Receiver<()>) -> Result<(), RuntimeError> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(RuntimeError::WorkerError(format!("{} worker is already running", self.name())));
        }

        let worker = self.clone();
        let tz = self.state.config.timezone;

        // fail fast on a time that can never be scheduled
        if let Err(e) = next_fire_after(&local_now(tz), worker.time) {
            self.running.store(false, Ordering::SeqCst);
            return Err(e);
        }

        tokio::spawn(async move {
            loop {
                let now = local_now(tz);
                let next = match next_fire_after(&now, worker.time) {
                    Ok(next) => next,
                    Err(e) => {
                        error!("Reminder worker cannot schedule: {}", e);
                        break;
                    }
                };
                let wait = (next - now).to_std().unwrap_or_default();

                info!("Next reminder at {}", next);

                tokio::select! {
                    _ = tokio::time::sleep(wait) => worker.fire().await,
                    _ = shutdown.recv() => break,
                }
            }

            worker.running.store(false, Ordering::SeqCst);
            info!("Reminder worker stopped");
        });

        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}
