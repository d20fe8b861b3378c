use maud::{DOCTYPE, Markup, html};

use crate::{endpoints, texts};

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_SECONDARY_STYLE: &str = "w-full py-2 px-4 text-sm font-medium \
    text-gray-900 bg-white rounded border border-gray-200 hover:bg-gray-100 \
    hover:text-blue-700 dark:bg-gray-800 dark:text-gray-400 dark:border-gray-600 \
    dark:hover:text-white dark:hover:bg-gray-700 text-center";

pub const BUTTON_LINK_STYLE: &str = "text-sm text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

pub const BUTTON_DELETE_STYLE: &str = "text-sm text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";
pub const FORM_TEXT_INPUT_ERROR_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white bg-gray-50 dark:bg-gray-700 border \
    border-red-300 focus:ring-red-500 focus:border-red-500";
pub const FORM_ERROR_STYLE: &str = "mt-1 text-sm text-red-600";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col gap-6 px-6 py-8 mx-auto max-w-5xl text-gray-900 dark:text-white";

/// The layout shared by every page.
///
/// Error notifications from htmx requests are swapped into `#alert-container`, and
/// `notifications` is rendered into it up front, e.g. a success message after a redirect.
pub fn base(title: &str, notifications: &Markup, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - " (texts::APP_NAME) }
                link href={ (endpoints::STATIC) "/main.css" } rel="stylesheet";

                script src="https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js" {}
                script src="https://unpkg.com/htmx-ext-response-targets@2.0.4/dist/response-targets.js" {}
                script src={ (endpoints::STATIC) "/app.js" } defer {}
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                div id="alert-container" { (notifications) }
            }
        }
    }
}

/// A page heading, the Title component.
pub fn page_title(text: &str) -> Markup {
    html! {
        h1 class="text-2xl font-bold text-gray-900 dark:text-white" { (text) }
    }
}

/// A horizontal rule, the Divider component.
pub fn divider() -> Markup {
    html! {
        hr class="my-4 border-gray-200 dark:border-gray-700";
    }
}

/// A white panel with an optional heading, the CardContainer component.
pub fn card_container(title: Option<&str>, content: &Markup) -> Markup {
    html! {
        section class="w-full bg-white dark:bg-gray-800 rounded-lg shadow p-6"
        {
            @if let Some(title) = title {
                h2 class="mb-4 text-lg font-semibold text-gray-900 dark:text-white" { (title) }
            }

            (content)
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p class="mb-4 text-2xl tracking-tight text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href=(endpoints::ROOT)
                        class="inline-flex text-white bg-blue-600 hover:bg-blue-800
                            font-medium rounded text-sm px-5 py-2.5 text-center my-4"
                    {
                        "Voltar para o início"
                    }
                }
            }
        }
    );

    base(title, &html! {}, &content)
}

#[cfg(test)]
mod tests {
    use maud::html;
    use scraper::{Html, Selector};

    use crate::{
        html::{base, card_container, error_view},
        test_utils::assert_valid_html,
    };

    #[test]
    fn base_has_alert_container_with_notifications() {
        let page = base("Teste", &html! { p id="notice" { "Olá" } }, &html! {});

        let document = Html::parse_document(&page.into_string());

        assert_valid_html(&document);
        let notice = document
            .select(&Selector::parse("#alert-container #notice").unwrap())
            .next();
        assert!(notice.is_some(), "want notice inside #alert-container");
    }

    #[test]
    fn card_container_renders_title() {
        let markup = card_container(Some("Transações"), &html! { p { "x" } });

        let fragment = Html::parse_fragment(&markup.into_string());

        let heading = fragment
            .select(&Selector::parse("h2").unwrap())
            .next()
            .expect("no heading");
        assert_eq!(heading.text().collect::<String>(), "Transações");
    }

    #[test]
    fn error_view_links_home() {
        let document = Html::parse_document(
            &error_view("Erro", "500", "Algo deu errado", "Tente novamente").into_string(),
        );

        assert_valid_html(&document);
        let link = document
            .select(&Selector::parse("a").unwrap())
            .next()
            .expect("no link");
        assert_eq!(link.value().attr("href"), Some("/"));
    }
}
