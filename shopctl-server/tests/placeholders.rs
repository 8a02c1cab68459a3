//! Property tests for catalog query placeholder numbering

use proptest::prelude::*;
use regex::Regex;
use shopctl_server::models::{FilterParams, FilterSpec};
use shopctl_server::query::{compose_products_query, SqlArg};

fn raw_value() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        any::<i64>().prop_map(|v| Some(v.to_string())),
        (-10i64..1000).prop_map(|v| Some(format!("  {v} "))),
        "[a-z' ;$0-9]{0,12}".prop_map(Some),
    ]
}

fn filter_params() -> impl Strategy<Value = FilterParams> {
    (
        raw_value(),
        raw_value(),
        raw_value(),
        prop_oneof![
            Just(None),
            Just(Some("price_asc".to_string())),
            Just(Some("PRICE_DESC".to_string())),
            "[a-z_]{0,10}".prop_map(Some),
        ],
        raw_value(),
        raw_value(),
    )
        .prop_map(|(category, min_price, max_price, sort, limit, offset)| FilterParams {
            category,
            min_price,
            max_price,
            sort,
            limit,
            offset,
        })
}

proptest! {
    #[test]
    fn placeholders_match_args(params in filter_params()) {
        let query = compose_products_query(&FilterSpec::from(params));
        let token = Regex::new(r"\$(\d+)").unwrap();

        let numbers: Vec<usize> = token
            .captures_iter(query.sql())
            .map(|c| c[1].parse().unwrap())
            .collect();
        let expected: Vec<usize> = (1..=query.args().len()).collect();

        prop_assert_eq!(numbers, expected);
    }

    #[test]
    fn page_is_always_bounded(params in filter_params()) {
        let query = compose_products_query(&FilterSpec::from(params));
        let args = query.args();
        prop_assert!(args.len() >= 2);

        match (&args[args.len() - 2], &args[args.len() - 1]) {
            (SqlArg::Int(limit), SqlArg::Int(offset)) => {
                prop_assert!((1..=500).contains(limit));
                prop_assert!(*offset >= 0);
            }
            other => prop_assert!(false, "limit/offset not trailing ints: {:?}", other),
        }
    }

    #[test]
    fn exactly_one_order_by(params in filter_params()) {
        let query = compose_products_query(&FilterSpec::from(params));
        prop_assert_eq!(query.sql().matches("ORDER BY").count(), 1);
    }
}
