use std::ops::Add;

/// Milliseconds on the host event-loop clock.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Millis(pub u64);

impl Millis {
    /// Clamped conversion for host timer APIs that take an `i32` delay.
    pub fn as_timeout_i32(self) -> i32 {
        self.0.min(i32::MAX as u64) as i32
    }
}

impl Add for Millis {
    type Output = Millis;

    fn add(self, rhs: Millis) -> Millis {
        Millis(self.0.saturating_add(rhs.0))
    }
}

#[cfg(test)]
mod tests {
    use super::Millis;

    #[test]
    fn add_saturates() {
        assert_eq!(Millis(u64::MAX) + Millis(1), Millis(u64::MAX));
        assert_eq!(Millis(300) + Millis(500), Millis(800));
    }

    #[test]
    fn timeout_is_clamped() {
        assert_eq!(Millis(800).as_timeout_i32(), 800);
        assert_eq!(Millis(u64::MAX).as_timeout_i32(), i32::MAX);
    }
}
