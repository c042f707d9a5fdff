//! The shared page shell, styles and formatting helpers for the HTML views.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_SELECT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";
pub const FORM_RANGE_STYLE: &str = "w-full h-2 bg-gray-200 rounded-lg \
    appearance-none cursor-pointer dark:bg-gray-700";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

/// An element to inject into the page `<head>`.
pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

// Browser-side dependencies, pinned so the markup and init scripts stay in
// step with known-good versions.
const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com/3.4.17";
const HTMX_CDN: &str = "https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js";

/// The shared page shell: head, scripts and body wrapper around `content`.
pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Launchboard" }

                script src=(TAILWIND_CDN) {}
                script src=(HTMX_CDN) {}

                style
                {
                    r#"
                    /* Keep chart tooltips above page content. */
                    .echarts-tooltip {
                        z-index: 30 !important;
                    }
                    "#
                }

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

/// A full error page with a large header, a description and a suggested fix.
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

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to the Dashboard"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// Format a mass in kilograms, rounded to the nearest whole kilogram with a
/// thousands separator, e.g. "2,000 kg".
pub fn format_mass(kilograms: f64) -> String {
    static MASS_FMT: OnceLock<Formatter> = OnceLock::new();

    let mass_fmt = MASS_FMT.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    format!("{} kg", mass_fmt.fmt_string(kilograms.round()))
}

#[cfg(test)]
mod tests {
    use super::format_mass;

    #[test]
    fn format_mass_adds_separator_and_unit() {
        assert_eq!(format_mass(2000.0), "2,000 kg");
        assert_eq!(format_mass(525.0), "525 kg");
        assert_eq!(format_mass(0.0), "0 kg");
    }

    #[test]
    fn format_mass_rounds_to_whole_kilograms() {
        assert_eq!(format_mass(2566.7), "2,567 kg");
    }
}
