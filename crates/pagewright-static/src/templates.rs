//! Template engine for rendering documentation pages.

use std::collections::BTreeMap;

use minijinja::{context, Environment};
use pagewright_mdx::TocEntry;

use crate::paths::url_segments;
use crate::pipeline::PageProps;

/// A navigation item.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Child items
    pub children: Vec<NavItem>,
    /// Whether this is the active page
    pub active: bool,
}

/// Site-wide values shared by every page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Site {
    /// Site title
    pub title: String,
    /// Base URL, always ending in `/`
    pub base_url: String,
}

impl Site {
    /// Public URL of the page at `url_path` (e.g. `/a/b`).
    pub fn page_url(&self, url_path: &str) -> String {
        format!("{}docs{}/", self.base_url, url_path)
    }
}

/// Build the sidebar from static paths.
///
/// Top-level documents come first, then one section per directory. The
/// entry for `active` (a URL path) is marked active.
pub fn build_navigation(site: &Site, paths: &[String], active: &str) -> Vec<NavItem> {
    let mut nav = Vec::new();
    let mut sections: BTreeMap<String, Vec<NavItem>> = BTreeMap::new();

    for path in paths {
        let segments = url_segments(path);
        let Some((name, dirs)) = segments.split_last() else {
            continue;
        };

        let item = NavItem {
            title: humanize(name),
            path: site.page_url(path),
            children: Vec::new(),
            active: path == active,
        };

        match dirs.first() {
            None => nav.push(item),
            Some(section) => sections.entry(section.to_string()).or_default().push(item),
        }
    }

    for (section, children) in sections {
        let active = children.iter().any(|c| c.active);
        nav.push(NavItem {
            title: humanize(&section),
            path: format!("{}docs/{}/", site.base_url, section),
            children,
            active,
        });
    }

    nav
}

/// Context for rendering a page template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Page title (empty when the document has none)
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Rendered content HTML
    pub content: String,
    /// Navigation items
    pub nav: Vec<NavItem>,
    /// Table of contents
    pub toc: Vec<TocEntry>,
    /// Base URL
    pub base_url: String,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template("base.html", BASE_TEMPLATE)
            .expect("Failed to add base template");
        env.add_template("doc.html", DOC_TEMPLATE)
            .expect("Failed to add doc template");
        env.add_template("error.html", ERROR_TEMPLATE)
            .expect("Failed to add error template");
        env.add_template("nav.html", NAV_TEMPLATE)
            .expect("Failed to add nav template");

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            site_title => &context.site_title,
            content => &context.content,
            nav => &context.nav,
            toc => &context.toc,
            base_url => &context.base_url,
        })
    }

    /// Render an error page showing `message`.
    pub fn render_error(&self, site: &Site, message: &str) -> Result<String, minijinja::Error> {
        self.env.get_template("error.html")?.render(context! {
            site_title => &site.title,
            base_url => &site.base_url,
            message => message,
        })
    }

    /// Render page props: the error page or the document layout.
    pub fn render_props(
        &self,
        site: &Site,
        props: &PageProps,
        nav: Vec<NavItem>,
    ) -> Result<String, minijinja::Error> {
        match props {
            PageProps::Error { error } => self.render_error(site, error),
            PageProps::Rendered { source, data } => {
                let context = Context {
                    title: data.title().unwrap_or_default().to_string(),
                    site_title: site.title.clone(),
                    content: source.html.clone(),
                    nav,
                    toc: source.toc.clone(),
                    base_url: site.base_url.clone(),
                };
                self.render_page("doc.html", &context)
            }
        }
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// `getting-started` -> `Getting started`
fn humanize(name: &str) -> String {
    let spaced = name.replace(['-', '_'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% if title %}{{ title }} - {% endif %}{{ site_title }}</title>
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body>
  {% block body %}{% endblock %}
</body>
</html>"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block body %}
<div class="layout">
  <nav class="sidebar">
    {% include "nav.html" %}
  </nav>
  <section class="main">
    {% if title %}<h1>{{ title }}</h1>{% endif %}
    <article class="content">
      {{ content | safe }}
    </article>
  </section>
  {% if toc %}
  <aside class="toc">
    <h2>On this page</h2>
    <ul>
    {% for entry in toc %}
      <li class="toc-level-{{ entry.level }}">
        <a href="#{{ entry.id }}">{{ entry.title }}</a>
      </li>
    {% endfor %}
    </ul>
  </aside>
  {% endif %}
</div>
{% endblock %}"##;

const ERROR_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block body %}
<section class="error">
  <h1>Error!</h1>
  <p>{{ message }}</p>
</section>
{% endblock %}"##;

const NAV_TEMPLATE: &str = r##"<div class="nav-header">
  <a href="{{ base_url }}" class="nav-logo">{{ site_title }}</a>
</div>
<ul class="nav-list">
{% for item in nav %}
  <li class="nav-item{% if item.active %} active{% endif %}">
    <a href="{{ item.path }}">{{ item.title }}</a>
    {% if item.children %}
    <ul class="nav-children">
      {% for child in item.children %}
      <li class="nav-item{% if child.active %} active{% endif %}">
        <a href="{{ child.path }}">{{ child.title }}</a>
      </li>
      {% endfor %}
    </ul>
    {% endif %}
  </li>
{% endfor %}
</ul>"##;
