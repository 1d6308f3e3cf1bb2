//! Password strength meter - advisory scoring for live feedback.
//!
//! The score never gates submission; it only drives the meter and the
//! requirements checklist next to the password field.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use std::time::Duration;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio::task::JoinHandle;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

/// Characters the meter counts as special. Narrower than the policy rule,
/// which accepts anything outside `[A-Za-z0-9]`.
pub const STRENGTH_SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

const STRENGTH_MIN_LENGTH: usize = 8;

/// Coarse strength level shown by the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

impl StrengthLevel {
    /// Maps a 0..=5 score to a level.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => StrengthLevel::Weak,
            3 => StrengthLevel::Medium,
            _ => StrengthLevel::Strong,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrengthLevel::Weak => "weak",
            StrengthLevel::Medium => "medium",
            StrengthLevel::Strong => "strong",
        }
    }

    /// Text shown next to the meter.
    pub fn label(self) -> &'static str {
        match self {
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Medium => "Medium",
            StrengthLevel::Strong => "Strong",
        }
    }

    /// How full the meter bar is, in percent.
    pub fn meter_percent(self) -> u8 {
        match self {
            StrengthLevel::Weak => 33,
            StrengthLevel::Medium => 66,
            StrengthLevel::Strong => 100,
        }
    }
}

impl std::fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthResult {
    /// Number of satisfied checks, 0..=5.
    pub score: u8,
    pub level: StrengthLevel,
}

/// One line of the requirements checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub label: &'static str,
    pub met: bool,
}

struct Checks {
    length: bool,
    upper: bool,
    lower: bool,
    digit: bool,
    special: bool,
}

fn run_checks(pwd: &str) -> Checks {
    Checks {
        length: pwd.chars().count() >= STRENGTH_MIN_LENGTH,
        upper: pwd.chars().any(|c| c.is_ascii_uppercase()),
        lower: pwd.chars().any(|c| c.is_ascii_lowercase()),
        digit: pwd.chars().any(|c| c.is_ascii_digit()),
        special: pwd.chars().any(|c| STRENGTH_SPECIAL_CHARS.contains(c)),
    }
}

/// Computes the advisory strength of a password.
///
/// One point per satisfied check: length >= 8, uppercase, lowercase,
/// digit, special character. An empty password scores 0.
pub fn compute_strength(password: &SecretString) -> StrengthResult {
    let checks = run_checks(password.expose_secret());
    let score = [
        checks.length,
        checks.upper,
        checks.lower,
        checks.digit,
        checks.special,
    ]
    .iter()
    .filter(|&&b| b)
    .count() as u8;

    StrengthResult {
        score,
        level: StrengthLevel::from_score(score),
    }
}

/// Requirements checklist for the password field, one entry per strength check.
pub fn requirements(password: &SecretString) -> [Requirement; 5] {
    let checks = run_checks(password.expose_secret());
    [
        Requirement { label: "At least 8 characters", met: checks.length },
        Requirement { label: "One uppercase letter", met: checks.upper },
        Requirement { label: "One lowercase letter", met: checks.lower },
        Requirement { label: "One number", met: checks.digit },
        Requirement { label: "One special character", met: checks.special },
    ]
}

/// Debounced strength evaluation that sends its result via channel.
///
/// Waits the configured debounce delay first; if `token` is cancelled in
/// the meantime (a newer keystroke arrived) nothing is sent.
#[cfg(feature = "async")]
pub async fn compute_strength_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<StrengthResult>,
) {
    let delay = crate::config::debounce_delay();
    compute_strength_debounced(password, delay, token, tx).await;
}

#[cfg(feature = "async")]
async fn compute_strength_debounced(
    password: &SecretString,
    delay: Duration,
    token: CancellationToken,
    tx: mpsc::Sender<StrengthResult>,
) {
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            #[cfg(feature = "tracing")]
            tracing::trace!("strength evaluation superseded");
            return;
        }
        _ = tokio::time::sleep(delay) => {}
    }

    let strength = compute_strength(password);

    #[cfg(feature = "tracing")]
    tracing::trace!("strength evaluated: {}", strength.level);

    if let Err(_e) = tx.send(strength).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password strength result: {}", _e);
    }
}

/// Live strength feed for a single password field.
///
/// Call [`StrengthMeter::update`] on every keystroke; only the last value
/// of a burst is evaluated.
#[cfg(feature = "async")]
pub struct StrengthMeter {
    delay: Duration,
    tx: mpsc::Sender<StrengthResult>,
    pending: Option<CancellationToken>,
}

#[cfg(feature = "async")]
impl StrengthMeter {
    /// Creates a meter using the configured debounce delay.
    pub fn new(tx: mpsc::Sender<StrengthResult>) -> Self {
        Self::with_delay(crate::config::debounce_delay(), tx)
    }

    pub fn with_delay(delay: Duration, tx: mpsc::Sender<StrengthResult>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
        }
    }

    /// Schedules an evaluation of `password`, cancelling the previous one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn update(&mut self, password: &SecretString) -> JoinHandle<()> {
        if let Some(previous) = self.pending.take() {
            previous.cancel();
        }

        let token = CancellationToken::new();
        self.pending = Some(token.clone());

        let password = SecretString::new(password.expose_secret().to_owned().into_boxed_str());
        let tx = self.tx.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            compute_strength_debounced(&password, delay, token, tx).await;
        })
    }

    /// Cancels the pending evaluation, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

#[cfg(feature = "async")]
impl Drop for StrengthMeter {
    fn drop(&mut self) {
        self.cancel();
    }
}


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;
    use serial_test::serial;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[tokio::test(start_paused = true)]
    #[serial]
    async fn test_compute_strength_tx() {
        unsafe { std::env::remove_var(crate::config::DEBOUNCE_ENV_VAR); }
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();

        compute_strength_tx(&secret("Abcdefg1!"), token, tx).await;

        let strength = rx.recv().await.expect("Should receive strength");
        assert_eq!(strength.score, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_evaluation_sends_nothing() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        token.cancel();

        compute_strength_debounced(&secret("Abcdefg1!"), Duration::from_millis(300), token, tx)
            .await;

        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_meter_only_reports_last_keystroke() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut meter = StrengthMeter::with_delay(Duration::from_millis(300), tx);

        meter.update(&secret("A"));
        meter.update(&secret("Ab"));
        let last = meter.update(&secret("Abcdefg1!"));
        last.await.expect("evaluation task panicked");

        let strength = rx.recv().await.expect("Should receive strength");
        assert_eq!(strength.score, 5);
        assert_eq!(strength.level, StrengthLevel::Strong);

        drop(meter);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_meter_cancel() {
        let (tx, mut rx) = mpsc::channel(1);
        let mut meter = StrengthMeter::with_delay(Duration::from_millis(300), tx);

        let handle = meter.update(&secret("Abcdefg1!"));
        meter.cancel();
        handle.await.expect("evaluation task panicked");

        drop(meter);
        assert!(rx.recv().await.is_none());
    }
}
