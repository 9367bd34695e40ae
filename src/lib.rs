pub mod shared {
    pub mod core {
        pub mod clock;
    }
    pub mod infrastructure {
        pub mod in_flight;
    }
}

pub mod modules {
    pub mod time_tracking {
        pub mod core {
            pub mod breaks;
            pub mod catalog;
            pub mod decision;
            pub mod duration;
            pub mod hours;
            pub mod policy;
            pub mod ports;
            pub mod state;
            pub mod summaries;
            pub mod time_entry;
        }
        pub mod use_cases {
            pub mod errors;
            pub mod clock_in {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod clock_out {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod start_break {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod end_break {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod build_summaries {
                pub mod builder;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod current_session {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_time_entries_by_user {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
                pub mod projection;
            }
            pub mod list_catalog {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod inbound {
                pub mod graphql;
                pub mod http_errors;
            }
            pub mod outbound {
                pub mod in_memory_catalog;
                pub mod in_memory_store;
            }
        }
    }
}

pub mod shell;
