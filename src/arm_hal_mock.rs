use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::debug;

use crate::arm_hal::{ArmHal, Joint};

/// Stand-in arm for dry runs and tests. Writes and dwells are recorded in a
/// journal instead of going anywhere; `settle` does not sleep so scripted
/// sequences replay instantly.
#[derive(Default)]
pub struct ArmHalMock {
    journal: Rc<RefCell<Vec<MockEvent>>>,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum MockEvent {
    PowerUp,
    Write { joint: Joint, angle_deg: i32 },
    Settle { ms: u64 },
}

impl ArmHalMock {
    pub fn new() -> Self {
        Default::default()
    }

    /// Handle onto the journal that stays readable after the mock is boxed
    /// away behind `dyn ArmHal`.
    pub fn journal(&self) -> MockJournal {
        MockJournal { events: Rc::clone(&self.journal) }
    }
}

impl ArmHal for ArmHalMock {
    fn power_up(&mut self) -> anyhow::Result<()> {
        debug!("power_up");
        self.journal.borrow_mut().push(MockEvent::PowerUp);
        Ok(())
    }

    fn write_angle(&mut self, joint: Joint, angle_deg: i32) -> anyhow::Result<()> {
        debug!("write_angle: {} -> {angle_deg}", joint.name());
        self.journal.borrow_mut().push(MockEvent::Write { joint, angle_deg });
        Ok(())
    }

    fn settle(&mut self, dwell: Duration) -> anyhow::Result<()> {
        debug!("settle: {}ms", dwell.as_millis());
        self.journal
            .borrow_mut()
            .push(MockEvent::Settle { ms: dwell.as_millis() as u64 });
        Ok(())
    }

    fn dump(&self) -> anyhow::Result<()> {
        debug!("mock arm, {} journaled events", self.journal.borrow().len());
        Ok(())
    }
}

#[derive(Clone)]
pub struct MockJournal {
    events: Rc<RefCell<Vec<MockEvent>>>,
}

impl MockJournal {
    pub fn events(&self) -> Vec<MockEvent> {
        self.events.borrow().clone()
    }

    pub fn writes(&self) -> Vec<(Joint, i32)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                MockEvent::Write { joint, angle_deg } => Some((*joint, *angle_deg)),
                _ => None,
            })
            .collect()
    }

    pub fn total_settle_ms(&self) -> u64 {
        self.events
            .borrow()
            .iter()
            .map(|event| match event {
                MockEvent::Settle { ms } => *ms,
                _ => 0,
            })
            .sum()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}
