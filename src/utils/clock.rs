use crate::store::entities::EntryDate;

use super::time::today;

/// Represents an entity responsible for providing dates across application. This can allow it to
/// be used for testing
pub trait Clock {
    fn today(&self) -> Option<EntryDate>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn today(&self) -> Option<EntryDate> {
        today()
    }
}
