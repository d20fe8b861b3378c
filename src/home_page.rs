//! The home page: dashboard, registration form and transaction list.

use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Query, State},
    response::{Html, IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    dashboard::dashboard_view,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base, card_container, divider, page_title},
    money::MoneyFormat,
    notification::{Notifications, notification_stack},
    texts::{dashboard, notice, register},
    transaction::{
        FormAction, TransactionForm, get_all_transactions, transaction_form, transaction_list,
    },
};

/// A success message shown after being redirected to the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Created,
    Updated,
    Deleted,
}

impl Notice {
    fn as_str(self) -> &'static str {
        match self {
            Notice::Created => "created",
            Notice::Updated => "updated",
            Notice::Deleted => "deleted",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Notice::Created => notice::CREATED,
            Notice::Updated => notice::UPDATED,
            Notice::Deleted => notice::DELETED,
        }
    }
}

impl FromStr for Notice {
    type Err = ();

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "created" => Ok(Notice::Created),
            "updated" => Ok(Notice::Updated),
            "deleted" => Ok(Notice::Deleted),
            _ => Err(()),
        }
    }
}

/// The URL of the home page showing `notice`.
pub fn home_with_notice(notice: Notice) -> String {
    format!("{}?notice={}", endpoints::ROOT, notice.as_str())
}

/// The state needed for the home page.
#[derive(Debug, Clone)]
pub struct HomePageState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// How amounts are shown.
    pub money_format: MoneyFormat,
}

impl FromRef<AppState> for HomePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            money_format: state.money_format,
        }
    }
}

/// The query string of the home page.
#[derive(Debug, Default, Deserialize)]
pub struct HomePageQuery {
    /// The name of a [Notice], unknown names are ignored.
    pub notice: Option<String>,
}

/// Display the dashboard, the registration form and every transaction.
pub async fn get_home_page(
    State(state): State<HomePageState>,
    Query(query): Query<HomePageQuery>,
) -> Response {
    let transactions = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        match get_all_transactions(&connection) {
            Ok(transactions) => transactions,
            Err(error) => {
                tracing::error!("could not get transactions: {error}");
                return error.into_response();
            }
        }
    };

    let mut notifications = Notifications::new();
    if let Some(notice) = query.notice.as_deref().and_then(|notice| notice.parse::<Notice>().ok()) {
        notifications.success(notice.message());
    }

    let today = OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date();
    let form = transaction_form(
        FormAction::Create,
        &TransactionForm::initial(today),
        &[],
        &state.money_format,
    );

    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            (page_title(dashboard::TITLE))
            (dashboard_view(&transactions, &state.money_format))
            (divider())
            (card_container(Some(register::TITLE), &form))
            (transaction_list(&transactions, &state.money_format))
        }
    };

    Html(base(dashboard::TITLE, &notification_stack(&notifications), &content).into_string())
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        db::initialize,
        home_page::{HomePageQuery, HomePageState, Notice, get_home_page, home_with_notice},
        money::{MonetaryAmount, MoneyFormat, TransactionType},
        test_utils::{
            assert_hx_endpoint, assert_status_ok, assert_valid_html, must_get_form,
            parse_html_document,
        },
        texts::notice,
        transaction::{Transaction, create_transaction},
    };

    fn get_test_state() -> HomePageState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        HomePageState {
            db_connection: Arc::new(Mutex::new(conn)),
            money_format: MoneyFormat::default(),
        }
    }

    #[test]
    fn notice_urls() {
        assert_eq!(home_with_notice(Notice::Created), "/?notice=created");
        assert_eq!(home_with_notice(Notice::Deleted), "/?notice=deleted");
    }

    #[tokio::test]
    async fn renders_dashboard_form_and_list() {
        let state = get_test_state();
        create_transaction(
            Transaction::build(
                "Salário",
                MonetaryAmount::from_minor_units(500000),
                TransactionType::Income,
                date!(2025 - 08 - 01),
            ),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = get_home_page(State(state), Query(HomePageQuery::default()))
            .await
            .into_response();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert!(
            document
                .select(&Selector::parse("#dashboard").unwrap())
                .next()
                .is_some(),
            "want dashboard"
        );
        assert_hx_endpoint(&must_get_form(&document), "/transactions", "hx-post");
        let items = document
            .select(&Selector::parse("#transaction-list li").unwrap())
            .count();
        assert_eq!(items, 1);
        let alerts = document
            .select(&Selector::parse("#alert-container [role=alert]").unwrap())
            .count();
        assert_eq!(alerts, 0);
    }

    #[tokio::test]
    async fn shows_notice_after_redirect() {
        let response = get_home_page(
            State(get_test_state()),
            Query(HomePageQuery {
                notice: Some("created".to_owned()),
            }),
        )
        .await
        .into_response();

        let document = parse_html_document(response).await;
        let alert = document
            .select(&Selector::parse("#alert-container [role=alert]").unwrap())
            .next()
            .expect("no notification");
        let text = alert.text().collect::<String>();
        assert!(text.contains(notice::CREATED), "got {text}");
    }

    #[tokio::test]
    async fn ignores_unknown_notice() {
        let response = get_home_page(
            State(get_test_state()),
            Query(HomePageQuery {
                notice: Some("bogus".to_owned()),
            }),
        )
        .await
        .into_response();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        let alerts = document
            .select(&Selector::parse("[role=alert]").unwrap())
            .count();
        assert_eq!(alerts, 0);
    }
}
