//! Best-effort reminder feedback: terminal bell and, on macOS, a desktop
//! notification. Nothing here ever fails the caller.

#[cfg(target_os = "macos")]
use std::process::Command;
use std::io::Write;

/// Something that can deliver a haptic-style pulse pattern
pub trait Haptics {
    /// Pulse with the given on/off pattern in milliseconds. Must not block
    /// for the duration of the pattern and must swallow any failure.
    fn pulse(&self, pattern: &[u64]);
}

/// Rings the terminal bell once per "on" segment of the pattern
pub struct TerminalHaptics;

/// Bell characters for a pattern: one per "on" segment, skipping zero-length ones
fn bell_sequence(pattern: &[u64]) -> String {
    let rings = pattern.iter().step_by(2).filter(|ms| **ms > 0).count();
    "\x07".repeat(rings)
}

impl Haptics for TerminalHaptics {
    fn pulse(&self, pattern: &[u64]) {
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(bell_sequence(pattern).as_bytes());
        let _ = stdout.flush();
    }
}

/// Haptics for environments without any feedback channel
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&self, _pattern: &[u64]) {}
}

/// Send a desktop notification for the daily reminder
pub fn notify_reminder(message: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "AllerEase - Medication Reminder""#,
            message.replace('"', "\\\"")
        );

        let _ = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_per_on_segment() {
        assert_eq!(bell_sequence(&crate::scheduler::HAPTIC_PATTERN), "\x07\x07");
        assert_eq!(bell_sequence(&[300]), "\x07");
        assert_eq!(bell_sequence(&[0, 100, 200]), "\x07");
        assert_eq!(bell_sequence(&[]), "");
    }

    #[test]
    fn test_no_haptics_is_silent() {
        NoHaptics.pulse(&[200]);
    }
}
