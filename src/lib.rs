pub mod shared {
    pub mod auth {
        pub mod capability;
        pub mod session;
    }
    pub mod core {
        pub mod errors;
        pub mod reference;
        pub mod time_format;
        pub mod week;
    }
    pub mod inbound {
        pub mod cron_guard;
        pub mod graphql;
        pub mod http_error;
    }
    pub mod infrastructure {
        pub mod document_store;
        pub mod intent_outbox;
    }
}

pub mod modules {
    pub mod timesheets {
        pub mod core {
            pub mod decision;
            pub mod status;
            pub mod timesheet;
        }
        pub mod use_cases {
            pub mod track_time {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod submit_timesheet {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod reject_timesheet {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod approve_timesheets {
                pub mod command;
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod pending_approvals {
                pub mod handler;
                pub mod queries_port;
                pub mod reconcile;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod recalculate_project_hours {
                pub mod handler;
                pub mod queries_port;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod pending_approval_queries;
                pub mod project_hours_queries;
                pub mod timesheet_documents;
            }
        }
    }
    pub mod organisation {
        pub mod core {
            pub mod documents;
        }
        pub mod use_cases {
            pub mod manage_clients {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod manage_projects {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod manage_tasks {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod add_task_to_all_projects {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod organisation_documents;
            }
        }
    }
    pub mod reminders {
        pub mod core {
            pub mod reminder;
        }
        pub mod use_cases {
            pub mod send_no_hours_reminders {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod send_past_due_reminders {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod reminder_queries;
            }
        }
    }
}

pub mod shell;

#[cfg(test)]
pub mod tests {
    pub mod fixtures {
        pub mod documents;
        pub mod state;
        pub mod timesheets;
    }

    pub mod e2e {
        pub mod graphql_tests;
        pub mod timesheet_lifecycle_tests;
    }
}
