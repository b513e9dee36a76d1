//! DOM-backed [`NavView`].
//!
//! Elements are discovered once with the configured selectors and held for
//! the lifetime of the controller.

use std::collections::BTreeMap;

use foundation::bounds::ClientRect;
use foundation::ids::SectionId;
use nav::{
    ClassSwap, InlineStyle, NavConfig, NavEntry, NavError, NavView, Section, ViewportMetrics,
    collapse_styles, link_style, nav_bar_classes, scroll_top_style,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, DomTokenList, Element, HtmlElement, NodeList, ScrollToOptions, Window};

pub(crate) fn dom_err(err: JsValue) -> NavError {
    NavError::Dom(
        err.as_string()
            .unwrap_or_else(|| format!("{:?}", err)),
    )
}

fn required(document: &Document, selector: &str) -> Result<HtmlElement, NavError> {
    document
        .query_selector(selector)
        .map_err(dom_err)?
        .ok_or_else(|| NavError::MissingElement(selector.to_string()))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| NavError::Dom(format!("{selector} is not an html element")))
}

fn apply_style(el: &Element, style: &InlineStyle) -> Result<(), NavError> {
    let res = match style {
        InlineStyle::Set(css) => el.set_attribute("style", css),
        InlineStyle::Remove => el.remove_attribute("style"),
    };
    res.map_err(dom_err)
}

fn apply_swap(classes: &DomTokenList, swap: ClassSwap<'_>) -> Result<(), NavError> {
    classes.remove_1(swap.remove).map_err(dom_err)?;
    classes.add_1(swap.add).map_err(dom_err)
}

fn elements(list: &NodeList) -> impl Iterator<Item = Element> + '_ {
    (0..list.length())
        .filter_map(move |i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
}

/// The page elements the controller works on.
pub struct PageElements {
    pub nav_list: HtmlElement,
    pub scroll_top: HtmlElement,
    pub main: HtmlElement,
    pub sections: Vec<(Section, HtmlElement)>,
}

impl PageElements {
    pub fn discover(document: &Document, config: &NavConfig) -> Result<Self, NavError> {
        let sel = &config.selectors;
        let nav_list = required(document, &sel.nav_list)?;
        let scroll_top = required(document, &sel.scroll_top)?;
        let main = required(document, &sel.main)?;

        let list = document
            .query_selector_all(&sel.sections)
            .map_err(dom_err)?;
        let mut sections = Vec::new();
        for el in elements(&list) {
            let Ok(el) = el.dyn_into::<HtmlElement>() else {
                continue;
            };
            let id = el.id();
            let label = el
                .get_attribute(&config.label_attribute)
                .unwrap_or_else(|| id.clone());
            // An inline style on a section is how the collapsed state is rendered.
            let mut section = Section::new(id, label);
            if el.has_attribute("style") {
                section = section.collapsed();
            }
            sections.push((section, el));
        }

        Ok(Self {
            nav_list,
            scroll_top,
            main,
            sections,
        })
    }
}

pub struct DomView {
    window: Window,
    document: Document,
    config: NavConfig,
    nav_list: HtmlElement,
    scroll_top: HtmlElement,
    sections: BTreeMap<SectionId, HtmlElement>,
}

impl DomView {
    pub fn new(
        window: Window,
        document: Document,
        config: NavConfig,
        nav_list: HtmlElement,
        scroll_top: HtmlElement,
        sections: impl IntoIterator<Item = (SectionId, HtmlElement)>,
    ) -> Self {
        Self {
            window,
            document,
            config,
            nav_list,
            scroll_top,
            sections: sections.into_iter().collect(),
        }
    }

    fn section(&self, id: &SectionId) -> Result<&HtmlElement, NavError> {
        self.sections
            .get(id)
            .ok_or_else(|| NavError::MissingElement(format!("#{id}")))
    }

    fn menu_links(&self) -> Result<NodeList, NavError> {
        self.nav_list
            .query_selector_all(&format!(".{}", self.config.classes.nav_link))
            .map_err(dom_err)
    }

    fn style_links(&self, highlighted: Option<&SectionId>) -> Result<(), NavError> {
        let links = self.menu_links()?;
        for link in elements(&links) {
            let anchor = link.get_attribute(&self.config.anchor_attribute);
            apply_style(&link, &link_style(anchor.as_deref(), highlighted, &self.config))?;
        }
        Ok(())
    }

    fn nav_bar(&self) -> Result<Element, NavError> {
        self.nav_list
            .parent_element()
            .ok_or_else(|| NavError::MissingElement("navigation bar".to_string()))
    }
}

impl NavView for DomView {
    fn metrics(&self) -> ViewportMetrics {
        let content_height = self
            .document
            .body()
            .map(|b| b.client_height() as f64)
            .unwrap_or(0.0);
        ViewportMetrics {
            scroll_y: self.window.scroll_y().unwrap_or(0.0),
            content_height,
            nav_height: self.nav_list.offset_height() as f64,
        }
    }

    fn section_rect(&self, id: &SectionId) -> Option<ClientRect> {
        let r = self.sections.get(id)?.get_bounding_client_rect();
        Some(ClientRect::new(r.top(), r.bottom(), r.left(), r.right()))
    }

    fn section_offset_top(&self, id: &SectionId) -> Option<f64> {
        self.sections.get(id).map(|el| el.offset_top() as f64)
    }

    fn append_entries(&mut self, entries: &[NavEntry]) -> Result<(), NavError> {
        let fragment = self.document.create_document_fragment();
        for entry in entries {
            let item = self.document.create_element("li").map_err(dom_err)?;
            item.set_attribute(&self.config.anchor_attribute, entry.anchor.as_str())
                .map_err(dom_err)?;
            item.set_text_content(Some(&entry.label));
            item.set_class_name(&self.config.classes.nav_link);
            fragment.append_child(&item).map_err(dom_err)?;
        }
        self.nav_list.append_child(&fragment).map_err(dom_err)?;
        Ok(())
    }

    fn set_section_active(&mut self, id: &SectionId, active: bool) -> Result<(), NavError> {
        let classes = self.section(id)?.class_list();
        let class = &self.config.classes.active_section;
        let res = if active {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        res.map_err(dom_err)
    }

    fn highlight(&mut self, anchor: &SectionId) -> Result<(), NavError> {
        self.style_links(Some(anchor))
    }

    fn clear_highlight(&mut self) -> Result<(), NavError> {
        self.style_links(None)
    }

    fn set_nav_bar_visible(&mut self, visible: bool) -> Result<(), NavError> {
        let classes = self.nav_bar()?.class_list();
        apply_swap(&classes, nav_bar_classes(visible, &self.config))
    }

    fn set_scroll_top_visible(&mut self, visible: bool) -> Result<(), NavError> {
        apply_style(&self.scroll_top, &scroll_top_style(visible))
    }

    fn set_section_expanded(&mut self, id: &SectionId, expanded: bool) -> Result<(), NavError> {
        let section = self.section(id)?;
        let toggle_sel = format!(".{}", self.config.classes.collapse_toggle);
        let icon = section
            .query_selector(&toggle_sel)
            .map_err(dom_err)?
            .ok_or_else(|| NavError::MissingElement(format!("#{id} {toggle_sel}")))?;
        // Body text is the element right after the icon's wrapper.
        let text = icon
            .parent_element()
            .and_then(|wrapper| wrapper.next_element_sibling())
            .ok_or_else(|| NavError::MissingElement(format!("#{id} section text")))?;

        let styles = collapse_styles(expanded, &self.config);
        apply_swap(&icon.class_list(), styles.icon)?;
        apply_style(&text, &styles.text)?;
        apply_style(section, &styles.section)
    }

    fn scroll_to(&mut self, top: f64) -> Result<(), NavError> {
        let opts = ScrollToOptions::new();
        opts.set_top(top);
        opts.set_left(0.0);
        opts.set_behavior(web_sys::ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&opts);
        Ok(())
    }
}
