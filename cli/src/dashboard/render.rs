use std::fmt::Write;

use super::DashboardView;

/// Renders the dashboard page.
pub fn page(view: &DashboardView) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>webdeck</title>\n\
         <link rel=\"icon\" href=\"/static/logo.webp\">\n\
         <style>\n\
         body{font-family:sans-serif;margin:2rem;background:#1e2127;color:#dcdfe4}\n\
         ul{list-style:none;padding:0;display:flex;flex-wrap:wrap;gap:1rem}\n\
         li a{display:flex;align-items:center;gap:.5rem;padding:.75rem 1rem;\
         background:#282c34;border-radius:6px;color:inherit;text-decoration:none}\n\
         li img{width:24px;height:24px}\n\
         .muted{color:#5c6370}\n\
         </style>\n</head>\n<body>\n",
    );

    let _ = writeln!(
        html,
        "<h1>Web services on {}</h1>\n<p class=\"muted\">scheduler: {}</p>",
        escape(&view.ip.to_string()),
        escape(&view.phase)
    );

    if view.no_services {
        html.push_str("<p>No web services found.</p>\n");
    } else {
        html.push_str("<ul>\n");
        for service in view.web_services.iter() {
            let _ = writeln!(
                html,
                "<li><a href=\"{link}\" target=\"_blank\"><img src=\"{icon}\" alt=\"\">\
                 <span>{title}</span><span class=\"muted\">:{port}</span></a></li>",
                link = escape(&service.link),
                icon = escape(&service.icon),
                title = escape(&service.title),
                port = service.port,
            );
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
