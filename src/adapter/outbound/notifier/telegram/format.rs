//! Message formatting for Telegram notifications.

use crate::domain::BalanceChange;
use crate::port::Event;

/// Format an event into the plain-text message sent to its user.
#[must_use]
pub fn format_event_message(event: &Event) -> String {
    match event {
        Event::BalanceObserved(e) => match e.change {
            BalanceChange::Initial { amount } => format!(
                "Contract {}\nAddress {}\nAmount {}",
                e.contract, e.wallet, amount
            ),
            BalanceChange::Changed { amount, delta } => format!(
                "Contract {}\nAddress {}\nAmount {}\nDelta {}",
                e.contract, e.wallet, amount, delta
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::port::BalanceEvent;
    use rust_decimal_macros::dec;

    fn event(change: BalanceChange) -> Event {
        Event::BalanceObserved(BalanceEvent {
            user: UserId(1),
            contract: "0xc".into(),
            wallet: "0xw".into(),
            change,
        })
    }

    #[test]
    fn baseline_message_has_no_delta() {
        let msg = format_event_message(&event(BalanceChange::Initial { amount: dec!(100) }));
        assert_eq!(msg, "Contract 0xc\nAddress 0xw\nAmount 100");
    }

    #[test]
    fn change_message_has_signed_delta() {
        let msg = format_event_message(&event(BalanceChange::Changed {
            amount: dec!(150),
            delta: dec!(50),
        }));
        assert_eq!(msg, "Contract 0xc\nAddress 0xw\nAmount 150\nDelta 50");

        let msg = format_event_message(&event(BalanceChange::Changed {
            amount: dec!(100),
            delta: dec!(-50),
        }));
        assert!(msg.ends_with("Delta -50"));
    }

    #[test]
    fn large_amounts_print_without_exponent() {
        let amount = dec!(12000000000000000000000000);
        let msg = format_event_message(&event(BalanceChange::Initial { amount }));
        assert!(msg.ends_with("Amount 12000000000000000000000000"));
    }
}
