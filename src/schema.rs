diesel::table! {
    ledger_rows (date) {
        date -> Text,
        day_index -> Integer,
        day_tag -> Text,
        portfolio_name -> Text,
        cash_value -> Text,
        total_value -> Text,
        benchmark_value -> Nullable<Text>,
        return_total_pct -> Nullable<Text>,
        return_vs_benchmark_pct -> Nullable<Text>,
        notes -> Text,
    }
}

diesel::table! {
    holdings_snapshots (snapshot_date) {
        snapshot_date -> Text,
        positions -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    watchlist_entries (id) {
        id -> Text,
        entry_date -> Text,
        ticker -> Text,
        close -> Nullable<Text>,
        currency -> Text,
        close_base -> Nullable<Text>,
        in_portfolio -> Bool,
    }
}

diesel::allow_tables_to_appear_in_same_query!(ledger_rows, holdings_snapshots, watchlist_entries,);
