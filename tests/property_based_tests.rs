mod common;

use common::strategies::*;
use proptest::prelude::*;
use service_status::{aggregate, ServiceStatus};

proptest! {
    /// Property: a single Down anywhere makes the group Down
    #[test]
    fn any_down_rolls_up_to_down(
        mut statuses in status_list(),
        position in any::<prop::sample::Index>(),
    ) {
        let at = position.index(statuses.len() + 1);
        statuses.insert(at, ServiceStatus::Down);
        prop_assert_eq!(aggregate(statuses), ServiceStatus::Down);
    }

    /// Property: without Down, a single Degraded makes the group Degraded
    #[test]
    fn degraded_without_down_rolls_up_to_degraded(
        mut statuses in prop::collection::vec(non_down_status(), 0..32),
        position in any::<prop::sample::Index>(),
    ) {
        let at = position.index(statuses.len() + 1);
        statuses.insert(at, ServiceStatus::Degraded);
        prop_assert_eq!(aggregate(statuses), ServiceStatus::Degraded);
    }

    /// Property: only Operational/Unknown (or nothing) rolls up to Operational
    #[test]
    fn benign_statuses_roll_up_to_operational(
        statuses in prop::collection::vec(benign_status(), 0..32),
    ) {
        prop_assert_eq!(aggregate(statuses), ServiceStatus::Operational);
    }

    /// Property: the rollup never depends on ordering
    #[test]
    fn rollup_ignores_order(statuses in status_list()) {
        let mut reversed = statuses.clone();
        reversed.reverse();
        prop_assert_eq!(aggregate(statuses), aggregate(reversed));
    }

    /// Property: the rollup is never Unknown
    #[test]
    fn rollup_is_never_unknown(statuses in status_list()) {
        prop_assert_ne!(aggregate(statuses), ServiceStatus::Unknown);
    }
}
