//! GAP connection event handler.
//!
//! The firmware turns every SoftDevice outcome into a [`GapEvent`] and feeds
//! it here; tests inject events directly. Each event that leaves the radio
//! idle restarts advertising (refresh fields, then start):
//!
//! | Event                 | Action            |
//! |-----------------------|-------------------|
//! | `Connect`, status 0   | none (link busy)  |
//! | `Connect`, status ≠ 0 | restart           |
//! | `Disconnect`, 0       | none              |
//! | `Disconnect`, ≠ 0     | restart           |
//! | `AdvComplete`         | restart           |
//! | anything else         | none              |
//!
//! A disconnect with reason 0 is left alone on purpose; real links always
//! end with a non-zero HCI reason.

use crate::advertising::{AdvertisingController, GapAdvertiser, Restart};
use crate::config::HCI_SUCCESS;

/// Events delivered by the BLE stack. Status and reason are HCI codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GapEvent {
    Connect { status: u8 },
    Disconnect { reason: u8 },
    AdvComplete,
    /// Any event the handler does not act on (parameter updates, MTU, ...).
    Other,
}

/// What the handler did with an event. The stack is never told of failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GapResponse {
    NoAction,
    Restarted(Restart),
}

pub fn handle_gap_event<A: GapAdvertiser>(
    ctrl: &mut AdvertisingController<A>,
    event: GapEvent,
) -> GapResponse {
    let restart = match event {
        GapEvent::Connect { status } => status != HCI_SUCCESS,
        GapEvent::Disconnect { reason } => reason != HCI_SUCCESS,
        GapEvent::AdvComplete => true,
        GapEvent::Other => false,
    };

    if restart {
        GapResponse::Restarted(ctrl.restart())
    } else {
        GapResponse::NoAction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advertising::{LinkState, StartOutcome};
    use crate::config::{HCI_CONN_FAILED_TO_BE_ESTABLISHED, HCI_REMOTE_USER_TERMINATED};
    use crate::error::AdvStartError;
    use crate::testing::FakeAdvertiser;

    fn controller() -> AdvertisingController<FakeAdvertiser> {
        AdvertisingController::new(FakeAdvertiser::new("BLE-Server"))
    }

    #[test]
    fn successful_connect_does_not_advertise() {
        let mut ctrl = controller();
        ctrl.advertiser_mut().link = LinkState::Connected;

        let response = handle_gap_event(&mut ctrl, GapEvent::Connect { status: 0 });

        assert_eq!(response, GapResponse::NoAction);
        assert!(ctrl.advertiser().start_calls.is_empty());
    }

    #[test]
    fn failed_connect_resumes_advertising() {
        let mut ctrl = controller();

        let response = handle_gap_event(
            &mut ctrl,
            GapEvent::Connect {
                status: HCI_CONN_FAILED_TO_BE_ESTABLISHED,
            },
        );

        assert!(matches!(
            response,
            GapResponse::Restarted(Restart {
                start: StartOutcome::Started,
                ..
            })
        ));
        assert_eq!(ctrl.advertiser().start_calls.len(), 1);
    }

    #[test]
    fn non_zero_disconnect_restarts_exactly_once() {
        let mut ctrl = controller();

        handle_gap_event(
            &mut ctrl,
            GapEvent::Disconnect {
                reason: HCI_REMOTE_USER_TERMINATED,
            },
        );

        assert_eq!(ctrl.advertiser().set_fields_calls, 1);
        assert_eq!(ctrl.advertiser().start_calls.len(), 1);
        assert_eq!(ctrl.advertiser().link, LinkState::Advertising);
    }

    #[test]
    fn clean_disconnect_does_not_restart() {
        let mut ctrl = controller();

        let response = handle_gap_event(&mut ctrl, GapEvent::Disconnect { reason: 0 });

        assert_eq!(response, GapResponse::NoAction);
        assert_eq!(ctrl.advertiser().set_fields_calls, 0);
        assert!(ctrl.advertiser().start_calls.is_empty());
    }

    #[test]
    fn adv_complete_always_restarts() {
        let mut ctrl = controller();
        handle_gap_event(&mut ctrl, GapEvent::AdvComplete);
        handle_gap_event(&mut ctrl, GapEvent::AdvComplete);

        assert_eq!(ctrl.advertiser().set_fields_calls, 2);
        assert_eq!(ctrl.advertiser().start_calls.len(), 2);
    }

    #[test]
    fn restart_while_advertising_is_swallowed() {
        let mut ctrl = controller();
        ctrl.advertiser_mut().link = LinkState::Advertising;

        let response = handle_gap_event(&mut ctrl, GapEvent::AdvComplete);

        assert_eq!(
            response,
            GapResponse::Restarted(Restart {
                fields: Ok(()),
                start: StartOutcome::Ignored(AdvStartError::AlreadyAdvertising),
            })
        );
    }

    #[test]
    fn other_events_are_ignored() {
        let mut ctrl = controller();
        assert_eq!(handle_gap_event(&mut ctrl, GapEvent::Other), GapResponse::NoAction);
        assert_eq!(ctrl.advertiser().set_fields_calls, 0);
    }
}
