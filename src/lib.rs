pub mod shared {
    pub mod core {
        pub mod primitives;
        pub mod session;
    }
    pub mod infrastructure {
        pub mod navigation;
        pub mod notices;
        pub mod session;
    }
}

pub mod modules {
    pub mod campus {
        pub mod errors;
        pub mod view;
        pub mod core {
            pub mod collections;
            pub mod edges;
            pub mod profile;
            pub mod records;
            pub mod view_state;
        }
        pub mod use_cases {
            pub mod observe_session {
                pub mod handler;
                pub mod listener;
            }
            pub mod fetch_collection {
                pub mod handler;
            }
            pub mod reconcile_memberships {
                pub mod handler;
            }
            pub mod toggle_membership {
                pub mod decide;
                pub mod decision;
                pub mod handler;
            }
            pub mod load_profile {
                pub mod handler;
                pub mod projection;
            }
            pub mod sign_out {
                pub mod handler;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod store;
                pub mod store_in_memory;
                pub mod store_postgrest;
            }
        }
    }
}

pub mod shell;
