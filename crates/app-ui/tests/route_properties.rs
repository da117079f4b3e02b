//! Property-based tests for route resolution and tab switching.

use std::sync::Arc;

use app_ui::navigation::{RouteId, RouteParams, RouteRegistry, SHIPMENT_ID_PARAM};
use app_ui::screens::main_container::TABS;
use app_ui::screens::MainContainer;
use proptest::prelude::*;
use uuid::Uuid;

proptest::proptest! {
    /// Any non-empty id survives resolve followed by match.
    #[test]
    fn shipment_id_round_trips(id in "\\PC{1,40}") {
        let registry = RouteRegistry::standard().unwrap();
        let params = RouteParams::from([(SHIPMENT_ID_PARAM.to_string(), id.clone())]);

        let path = registry.resolve(RouteId::ShipmentDetail, &params).unwrap();
        let matched = registry.match_path(&path).unwrap();

        prop_assert_eq!(matched.route, RouteId::ShipmentDetail);
        prop_assert_eq!(matched.params.get(SHIPMENT_ID_PARAM), Some(&id));
    }

    /// A leading slash never changes the match.
    #[test]
    fn leading_slash_is_ignored(id in "[A-Z]{3}-[0-9]{3}") {
        let registry = RouteRegistry::standard().unwrap();
        let path = format!("encomienda_detail/{}", id);

        prop_assert_eq!(
            registry.match_path(&path).unwrap(),
            registry.match_path(&format!("/{}", path)).unwrap()
        );
    }

    /// However tabs are switched, the stack is the start tab plus at most the
    /// selected one, and the selected tab is on top.
    #[test]
    fn tab_switching_keeps_stack_flat(picks in proptest::collection::vec(0usize..3, 1..30)) {
        let mut main = MainContainer::new(Uuid::new_v4(), Arc::new(RouteRegistry::standard().unwrap())).unwrap();

        for pick in picks {
            let tab = TABS[pick];
            main.select_tab(tab).unwrap();

            let routes = main.tabs().routes();
            prop_assert_eq!(routes[0], RouteId::Dashboard);
            prop_assert!(routes.len() <= 2);
            prop_assert_eq!(main.tabs().current_route(), tab);
        }
    }
}
