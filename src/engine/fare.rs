use tracing::debug;

use crate::btc::{FareCategory, FareEvent};

/// Passenger counts of one trip, per fare category.
///
/// Category 2 mixes elderly riders with free-pass holders: one third of it
/// (truncated) is moved to the free-pass bucket, the rest counts as elderly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FareTally {
    quantities: [u32; 6],
}

impl FareTally {
    pub fn from_events(events: &[FareEvent]) -> Self {
        let mut tally = Self::default();
        for event in events {
            match event.fare_category() {
                Some(category) => tally.add(category, event.quantity()),
                None => debug!("Ignoring unknown fare category {:?}", event.category),
            }
        }
        tally
    }

    pub fn add(&mut self, category: FareCategory, quantity: u32) {
        let slot = &mut self.quantities[category.code() as usize - 1];
        *slot = slot.saturating_add(quantity);
    }

    /// Raw quantity recorded for `category`, before the category 2 split.
    pub fn quantity(&self, category: FareCategory) -> u32 {
        self.quantities[category.code() as usize - 1]
    }

    fn common_free_pass_share(&self) -> u32 {
        self.quantity(FareCategory::ElectronicCommon) / 3
    }

    pub fn elderly(&self) -> u32 {
        self.quantity(FareCategory::ElectronicCommon) - self.common_free_pass_share()
    }

    pub fn free_pass(&self) -> u32 {
        self.quantity(FareCategory::FreePass)
            .saturating_add(self.common_free_pass_share())
    }

    pub fn cash(&self) -> u32 {
        self.quantity(FareCategory::Cash)
    }

    pub fn other_gratuity(&self) -> u32 {
        self.quantity(FareCategory::Employee)
    }

    pub fn electronic_paid(&self) -> u32 {
        self.quantity(FareCategory::ElectronicVt)
            .saturating_add(self.elderly())
    }

    pub fn paying(&self) -> u32 {
        self.electronic_paid().saturating_add(self.cash())
    }
}

#[test]
fn common_split_test() {
    let mut tally = FareTally::default();
    tally.add(FareCategory::ElectronicCommon, 15);
    assert_eq!(tally.free_pass(), 5);
    assert_eq!(tally.elderly(), 10);
}

#[test]
fn common_split_truncates_test() {
    let mut tally = FareTally::default();
    tally.add(FareCategory::ElectronicCommon, 2);
    assert_eq!(tally.free_pass(), 0);
    assert_eq!(tally.elderly(), 2);
}
