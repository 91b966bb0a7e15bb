//! Fake catalog site served by wiremock.

#![allow(dead_code)]

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path of the catalog root on the mock server
pub const CATALOG_PATH: &str = "/catalogo";

pub fn catalog_root(server: &MockServer) -> String {
    format!("{}{}", server.uri(), CATALOG_PATH)
}

/// Catalog root with `pages` numbered items plus a "next" control.
pub fn pagination_html(pages: u32) -> String {
    let mut items: String = (1..=pages)
        .map(|n| format!("<li><a href=\"/?page={n}\">{n}</a></li>"))
        .collect();
    items.push_str("<li><a href=\"/?page=2\">Siguiente</a></li>");
    format!(
        r#"<html><body>
            <div class="paginacion-all-series">
                <ul class="pagination"><nav><ul class="pagination">{items}</ul></nav></ul>
            </div>
        </body></html>"#
    )
}

/// One catalog card; `href: None` renders an anchor without a detail link.
pub fn card(href: Option<&str>, name: &str) -> String {
    let body = format!(
        r#"<img src="/img/{name}.png">
           <div class="informacion-serie"><div>
               <p class="nombre-serie">{name}</p>
               <span class="marcador-cartoon"> Cartoon </span>
               <span class="marcador-ano">2004</span>
               <span class="valoracion">7</span>
           </div></div>"#
    );
    match href {
        Some(h) => format!(r#"<a href="{h}">{body}</a>"#),
        None => format!("<a>{body}</a>"),
    }
}

pub fn catalog_html(cards: &[String]) -> String {
    format!(
        r#"<html><body><div class="conjuntos-series">{}</div></body></html>"#,
        cards.concat()
    )
}

/// Show page. Each season is a heading followed by its episode list;
/// `extra_headings` are appended without a list.
pub fn show_html(seasons: &[(&str, Vec<(&str, &str)>)], extra_headings: &[&str]) -> String {
    let mut body = String::new();
    for (name, episodes) in seasons {
        body.push_str(&format!("<h4 class=\"estilo-temporada\">\n  {name}\n</h4>"));
        let items: String = episodes
            .iter()
            .map(|(href, title)| format!("<li><a href=\"{href}\"> {title} </a></li>"))
            .collect();
        body.push_str(&format!("<div><ul>{items}</ul></div>"));
    }
    for name in extra_headings {
        body.push_str(&format!("<h4 class=\"estilo-temporada\">{name}</h4>"));
    }
    format!(r#"<html><body><div class="contenedor-episondios">{body}</div></body></html>"#)
}

/// Episode page, with or without an embedded player.
pub fn episode_html(player: Option<&str>) -> String {
    let frame = player
        .map(|src| format!(r#"<iframe src="{src}"></iframe>"#))
        .unwrap_or_default();
    format!(r#"<html><body><div class="container">{frame}</div></body></html>"#)
}

pub async fn mount_html(server: &MockServer, at: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

/// Like `mount_html`, answering only after `delay`.
pub async fn mount_html_delayed(server: &MockServer, at: &str, html: String, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_string(html).set_delay(delay))
        .mount(server)
        .await;
}

/// Token cancelled from a background task once `after` has elapsed.
pub fn cancel_after(after: Duration) -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(after).await;
        trigger.cancel();
    });
    cancel
}

pub async fn mount_status(server: &MockServer, at: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub async fn mount_catalog_page(server: &MockServer, page: u32, html: String, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(format!("{CATALOG_PATH}/")))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(html).set_delay(delay))
        .mount(server)
        .await;
}

pub async fn mount_catalog_status(server: &MockServer, page: u32, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("{CATALOG_PATH}/")))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
