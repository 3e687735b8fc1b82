use maud::{html, Markup, PreEscaped, DOCTYPE};

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

const BASE_CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #1f2937; }
header { display: flex; align-items: center; gap: 1rem; padding: 0.75rem 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
header nav ul { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
.container { max-width: 1200px; margin: 0 auto; padding: 1.5rem; }
.listing { display: grid; grid-template-columns: 280px 1fr; gap: 2rem; }
.filters label { display: block; margin-top: .75rem; font-size: .9rem; }
.filters select, .filters input[type=number] { width: 100%; padding: 4px; }
.property-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); gap: 1rem; }
.property-card { border: 1px solid #e5e7eb; border-radius: 8px; overflow: hidden; }
.property-card img { width: 100%; height: 160px; object-fit: cover; }
.property-card .body { padding: .75rem; }
.price { font-weight: bold; color: #524ed2; }
.chips span { display: inline-block; font-size: .75rem; background: #f3f4f6; border-radius: 999px; padding: 2px 8px; margin: 2px; }
.empty, .fetch-error { padding: 2rem; text-align: center; border: 1px dashed #d1d5db; border-radius: 8px; }
.fetch-error { color: #b91c1c; border-color: #fca5a5; }
.loader { padding: 2rem; text-align: center; color: #6b7280; }
.pager { display: flex; justify-content: space-between; margin-top: 1rem; }
.capitalize { text-transform: capitalize; }
"#;

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(BASE_CSS)) }
                script src=(HTMX_SRC) defer {}
            }
            body {
                header {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#524ed2"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        class="icon icon-tabler icon-tabler-home"
                    {
                        path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                        path d="M5 12l-2 0l9 -9l9 9l-2 0" {}
                        path d="M5 12v7a2 2 0 0 0 2 2h10a2 2 0 0 0 2 -2v-7" {}
                        path d="M9 21v-6a2 2 0 0 1 2 -2h2a2 2 0 0 1 2 2v6" {}
                    }
                    h3 { "Find a Home" }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            li { a href="/properties" { "Properties" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
