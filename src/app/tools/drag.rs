//! Verzögerte Drag-Erkennung über einen pro Tick heruntergezählten Timer.

/// Countdown bis ein gehaltener Klick als Drag gilt.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragTimer {
    remaining: Option<f32>,
}

impl DragTimer {
    /// Gespannter Timer mit Verzögerung in Sekunden.
    pub fn armed(delay_secs: f32) -> Self {
        Self {
            remaining: Some(delay_secs.max(0.0)),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn disarm(&mut self) {
        self.remaining = None;
    }

    /// Zählt um `delta_time` herunter.
    ///
    /// Gibt genau in dem Tick `true` zurück, in dem der Timer abläuft;
    /// danach ist er entschärft.
    pub fn tick(&mut self, delta_time: f32) -> bool {
        let Some(remaining) = self.remaining.as_mut() else {
            return false;
        };
        *remaining -= delta_time.max(0.0);
        if *remaining <= 0.0 {
            self.remaining = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_delay() {
        let mut timer = DragTimer::armed(0.15);
        assert!(!timer.tick(0.1));
        assert!(timer.tick(0.1));
        assert!(!timer.is_armed());
        assert!(!timer.tick(0.1));
    }

    #[test]
    fn disarmed_timer_never_fires() {
        let mut timer = DragTimer::armed(0.05);
        timer.disarm();
        assert!(!timer.tick(1.0));
        assert!(!DragTimer::default().tick(1.0));
    }

    #[test]
    fn negative_delta_does_not_rewind() {
        let mut timer = DragTimer::armed(0.1);
        assert!(!timer.tick(-5.0));
        assert!(timer.tick(0.1));
    }
}
