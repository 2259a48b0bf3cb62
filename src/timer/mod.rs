/// 경매 카운트다운 타이머
/// 남은 시간을 주기적으로 다시 계산해 watch 채널로 내보낸다.
/// 핸들을 cancel 하거나 drop 하면 반복 작업도 중단된다.
// region:    --- Imports
use crate::clock::Clock;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::debug;

// endregion: --- Imports

pub const ENDED_LABEL: &str = "Ended";

/// 기본 갱신 주기
pub const TICK: Duration = Duration::from_secs(1);

const URGENT_MS: i64 = 60 * 60 * 1000;

// region:    --- Time Left
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeLeft {
    pub label: String,
    /// 1시간 미만 남음
    pub urgent: bool,
    pub ended: bool,
}

/// 남은 시간 계산: `Nd Nh` / `Nh Nm` / `Nm Ns`
pub fn time_left(end_time: DateTime<Utc>, now: DateTime<Utc>) -> TimeLeft {
    let difference = end_time.signed_duration_since(now).num_milliseconds();
    if difference <= 0 {
        return TimeLeft {
            label: ENDED_LABEL.to_string(),
            urgent: false,
            ended: true,
        };
    }

    let days = difference / (1000 * 60 * 60 * 24);
    let hours = (difference % (1000 * 60 * 60 * 24)) / (1000 * 60 * 60);
    let minutes = (difference % (1000 * 60 * 60)) / (1000 * 60);
    let seconds = (difference % (1000 * 60)) / 1000;

    let label = if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m {seconds}s")
    };

    TimeLeft {
        label,
        urgent: difference < URGENT_MS,
        ended: false,
    }
}
// endregion: --- Time Left

// region:    --- Countdown Timer
pub struct CountdownTimer;

impl CountdownTimer {
    /// 카운트다운 시작. 종료 표시 후에는 스스로 멈춘다.
    /// 주기가 0이면 기본 주기(`TICK`)를 쓴다.
    pub fn start(end_time: DateTime<Utc>, clock: Arc<dyn Clock>, period: Duration) -> CountdownHandle {
        let period = if period.is_zero() { TICK } else { period };
        let (tx, rx) = watch::channel(time_left(end_time, clock.now()));

        let task = tokio::spawn(async move {
            let mut interval = interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // 첫 tick은 즉시 완료되므로 건너뜀
            interval.tick().await;
            loop {
                interval.tick().await;
                let left = time_left(end_time, clock.now());
                debug!("{:<12} --> 남은 시간: {}", "Timer", left.label);
                let ended = left.ended;
                if tx.send(left).is_err() || ended {
                    break;
                }
            }
        });

        CountdownHandle { rx, task }
    }
}

/// 카운트다운 취소 핸들
pub struct CountdownHandle {
    rx: watch::Receiver<TimeLeft>,
    task: JoinHandle<()>,
}

impl CountdownHandle {
    pub fn current(&self) -> TimeLeft {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TimeLeft> {
        self.rx.clone()
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
// endregion: --- Countdown Timer
