use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, KeyboardEvent, Url};

use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::nav::{toggle_follow_label, Section, MENU_ITEMS, SECTIONS};
use crate::post::MediaKind;
use crate::presenter::{
    user_message, FeedEvent, FeedPresenter, MediaSelection, Outcome, SHARE_CONFIRMATION,
};
use crate::search::search_profiles;
use crate::slot::{js_error_text, LocalStorageSlot, MemorySlot, PersistenceSlot};
use crate::store::PostStore;
use crate::theme::{Theme, ThemePreference};
use crate::view::{PostView, COMMENT_PLACEHOLDER, POSTED_AT_LABEL, SHARE_LABEL};

pub type SharedSlot = Rc<dyn PersistenceSlot>;

const CLICK_DATA_ATTRIBUTES: [&str; 4] = ["like", "comment", "share", "delcomment"];

#[wasm_bindgen(
    inline_js = "export function write_clipboard_text(text) { return navigator.clipboard.writeText(text); }"
)]
extern "C" {
    #[wasm_bindgen(catch)]
    fn write_clipboard_text(text: &str) -> Result<js_sys::Promise, JsValue>;
}

async fn copy_to_clipboard(text: &str) -> crate::error::Result<()> {
    let promise =
        write_clipboard_text(text).map_err(|err| FeedError::Clipboard(js_error_text(&err)))?;
    JsFuture::from(promise)
        .await
        .map_err(|err| FeedError::Clipboard(js_error_text(&err)))?;
    Ok(())
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.alert_with_message(message) {
            error!("alert failed: {:?}", err);
        }
    }
}

fn report(err: &FeedError) {
    error!("{}", err);
    alert(&user_message(err));
}

fn element(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

fn text_element(document: &Document, tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
    let el = element(document, tag, class)?;
    el.set_text_content(Some(text));
    Ok(el)
}

fn input(document: &Document, id: &str, kind: &str, placeholder: &str) -> Result<HtmlInputElement, JsValue> {
    let el = document.create_element("input")?.dyn_into::<HtmlInputElement>()?;
    el.set_id(id);
    el.set_type(kind);
    el.set_placeholder(placeholder);
    Ok(el)
}

fn listen<F>(target: &EventTarget, kind: &str, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) -> Result<(), JsValue> + 'static,
{
    let kind_name = kind.to_owned();
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Err(err) = handler(event) {
            error!("{} handler failed: {:?}", kind_name, err);
        }
    });
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn open_slot() -> SharedSlot {
    match LocalStorageSlot::from_window() {
        Ok(slot) => Rc::new(slot),
        Err(err) => {
            error!("{}, changes will not survive a reload", err);
            Rc::new(MemorySlot::new())
        }
    }
}

/// Draws one post card from its view-model.
pub fn render_post(document: &Document, view: &PostView) -> Result<Element, JsValue> {
    let index = view.index.to_string();
    let card = element(document, "div", "card post")?;

    let header = element(document, "div", "post-header")?;
    let avatar = text_element(document, "div", "avatar", &view.avatar)?;
    header.append_child(&avatar)?;
    let byline = element(document, "div", "")?;
    let author = text_element(document, "h3", "", &view.author)?;
    byline.append_child(&author)?;
    let posted_at = text_element(document, "span", "", POSTED_AT_LABEL)?;
    byline.append_child(&posted_at)?;
    header.append_child(&byline)?;
    card.append_child(&header)?;

    if let Some(text) = &view.text {
        let body = text_element(document, "p", "", text)?;
        card.append_child(&body)?;
    }

    match &view.media {
        Some((uri, MediaKind::Image)) => {
            let img = element(document, "img", "post-media")?;
            img.set_attribute("src", uri)?;
            card.append_child(&img)?;
        }
        Some((uri, MediaKind::Video)) => {
            let video = element(document, "video", "post-media")?;
            video.set_attribute("controls", "")?;
            let source = element(document, "source", "")?;
            source.set_attribute("src", uri)?;
            video.append_child(&source)?;
            card.append_child(&video)?;
        }
        None => {}
    }

    let actions = element(document, "div", "post-actions")?;
    let like = text_element(document, "span", if view.liked { "liked" } else { "" }, &view.like_label)?;
    like.set_attribute("data-like", &index)?;
    actions.append_child(&like)?;
    let comment = text_element(document, "span", "", &view.comment_label)?;
    comment.set_attribute("data-comment", &index)?;
    actions.append_child(&comment)?;
    let share = text_element(document, "span", "", SHARE_LABEL)?;
    share.set_attribute("data-share", &index)?;
    actions.append_child(&share)?;
    card.append_child(&actions)?;

    let comment_box = element(document, "div", "comment-box")?.dyn_into::<HtmlElement>()?;
    comment_box.set_id(&format!("comment-{}", index));
    comment_box.set_hidden(!view.comments_expanded);

    let comment_input = document.create_element("input")?.dyn_into::<HtmlInputElement>()?;
    comment_input.set_type("text");
    comment_input.set_placeholder(COMMENT_PLACEHOLDER);
    comment_input.set_attribute("data-input", &index)?;
    comment_box.append_child(&comment_input)?;

    let comment_list = element(document, "div", "comment-list")?;
    for (comment_index, text) in view.comments.iter().enumerate() {
        let row = element(document, "div", "comment")?;
        let comment_text = text_element(document, "span", "", text)?;
        row.append_child(&comment_text)?;
        let delete = text_element(document, "button", "", "✖")?;
        delete.set_attribute("data-delcomment", &format!("{}-{}", index, comment_index))?;
        row.append_child(&delete)?;
        comment_list.append_child(&row)?;
    }
    comment_box.append_child(&comment_list)?;
    card.append_child(&comment_box)?;

    Ok(card)
}

/// Replaces the whole feed.
pub fn render_feed(document: &Document, feed: &Element, views: &[PostView]) -> Result<(), JsValue> {
    feed.set_inner_html("");
    for view in views {
        let card = render_post(document, view)?;
        feed.append_child(&card)?;
    }
    debug!("rendered {} posts", views.len());
    Ok(())
}

/// The mounted page: scaffold elements plus the state their listeners share.
pub struct FeedPage {
    document: Document,
    body: HtmlElement,
    feed: Element,
    post_input: HtmlInputElement,
    media_input: HtmlInputElement,
    theme_toggle: Element,
    nav_items: Vec<Element>,
    search_overlay: HtmlElement,
    search_input: HtmlInputElement,
    search_results: Element,
    presenter: RefCell<FeedPresenter<SharedSlot>>,
    theme: RefCell<ThemePreference<SharedSlot>>,
    config: FeedConfig,
}

impl FeedPage {
    /// Builds the page inside the configured root element and wires every
    /// listener.
    pub fn mount(config: FeedConfig) -> Result<Rc<FeedPage>, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;
        let root = document
            .query_selector(&config.root_selector)?
            .ok_or_else(|| JsValue::from_str(&format!("missing {}", config.root_selector)))?;
        root.set_inner_html("");

        let slot = open_slot();
        let store = PostStore::open(slot.clone(), &config.posts_key);
        let presenter = FeedPresenter::new(store, config.current_user.clone());
        let theme = ThemePreference::load(slot, &config.theme_key);

        let top_bar = element(&document, "div", "top-bar")?;
        let theme_toggle = text_element(&document, "button", "", theme.current().toggle_glyph())?;
        theme_toggle.set_id("themeToggle");
        top_bar.append_child(&theme_toggle)?;
        root.append_child(&top_bar)?;

        let sidebar = element(&document, "nav", "sidebar")?;
        let mut nav_items = Vec::new();
        for section in SECTIONS {
            let item = text_element(&document, "div", "nav-item", section.label())?;
            item.set_attribute("data-action", section.action())?;
            sidebar.append_child(&item)?;
            nav_items.push(item);
        }
        root.append_child(&sidebar)?;

        let main = element(&document, "main", "")?;
        let composer = element(&document, "div", "card composer")?;
        let post_input = input(&document, "postInput", "text", "What's on your mind?")?;
        composer.append_child(&post_input)?;
        let media_input = input(&document, "mediaInput", "file", "")?;
        media_input.set_accept("image/*,video/*");
        media_input.set_hidden(true);
        composer.append_child(&media_input)?;
        let media_button = text_element(&document, "button", "", "📷")?;
        media_button.set_id("mediaBtn");
        composer.append_child(&media_button)?;
        let post_button = text_element(&document, "button", "", "Post")?;
        post_button.set_id("postBtn");
        composer.append_child(&post_button)?;
        main.append_child(&composer)?;

        let feed = element(&document, "div", "")?;
        feed.set_id("feed");
        main.append_child(&feed)?;
        root.append_child(&main)?;

        let suggestions = element(&document, "aside", "suggestions")?;
        for name in &config.suggested_profiles {
            let card = element(&document, "div", "suggestion-card")?;
            let label = text_element(&document, "span", "", name)?;
            card.append_child(&label)?;
            let follow = text_element(&document, "button", "", "Follow")?;
            card.append_child(&follow)?;
            suggestions.append_child(&card)?;
        }
        root.append_child(&suggestions)?;

        let search_overlay = element(&document, "div", "")?.dyn_into::<HtmlElement>()?;
        search_overlay.set_id("search-overlay");
        search_overlay.set_hidden(true);
        let search_input = input(&document, "searchInput", "text", "Search")?;
        search_overlay.append_child(&search_input)?;
        let search_results = element(&document, "div", "")?;
        search_results.set_id("searchResults");
        search_overlay.append_child(&search_results)?;
        root.append_child(&search_overlay)?;

        let page = Rc::new(FeedPage {
            document,
            body,
            feed,
            post_input,
            media_input,
            theme_toggle,
            nav_items,
            search_overlay,
            search_input,
            search_results,
            presenter: RefCell::new(presenter),
            theme: RefCell::new(theme),
            config,
        });

        page.apply_theme(page.theme.borrow().current())?;
        page.render()?;

        let page0 = page.clone();
        listen(&page.feed, "click", move |event| page0.on_feed_click(&event))?;
        let page0 = page.clone();
        listen(&page.feed, "keydown", move |event| page0.on_feed_keydown(&event))?;
        let page0 = page.clone();
        listen(&post_button, "click", move |_event| page0.on_submit_post())?;
        let page0 = page.clone();
        listen(&media_button, "click", move |_event| {
            page0.media_input.click();
            Ok(())
        })?;
        let page0 = page.clone();
        listen(&page.theme_toggle, "click", move |_event| page0.on_theme_toggle())?;
        for item in &page.nav_items {
            let page0 = page.clone();
            let item0 = item.clone();
            listen(item, "click", move |_event| page0.on_nav(&item0))?;
        }
        listen(&suggestions, "click", |event| {
            if let Some(button) = event_element(&event).filter(|el| el.tag_name() == "BUTTON") {
                let label = button.text_content().unwrap_or_default();
                button.set_text_content(Some(toggle_follow_label(&label)));
            }
            Ok(())
        })?;
        let page0 = page.clone();
        listen(&page.search_input, "input", move |_event| page0.on_search_input())?;
        let page0 = page.clone();
        listen(&page.search_results, "click", move |_event| {
            page0.close_search()
        })?;
        let page0 = page.clone();
        listen(&page.search_overlay, "click", move |event| {
            let on_backdrop = event_element(&event)
                .map(|target| target == *page0.search_overlay)
                .unwrap_or(false);
            if on_backdrop {
                page0.close_search()?;
            }
            Ok(())
        })?;
        let page0 = page.clone();
        listen(&page.document, "keydown", move |event| {
            match event.dyn_ref::<KeyboardEvent>() {
                Some(key_event) if key_event.key() == "Escape" => page0.close_search(),
                _ => Ok(()),
            }
        })?;

        debug!("feed page mounted");
        Ok(page)
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let views = self.presenter.borrow_mut().render();
        render_feed(&self.document, &self.feed, &views)
    }

    fn dispatch(&self, event: FeedEvent, source: Option<&HtmlInputElement>) -> Result<(), JsValue> {
        let result = self.presenter.borrow_mut().handle(event);
        match result {
            Ok(outcome) => self.apply(outcome, source),
            Err(err) => {
                report(&err);
                Ok(())
            }
        }
    }

    fn apply(&self, outcome: Outcome, source: Option<&HtmlInputElement>) -> Result<(), JsValue> {
        match outcome {
            Outcome::Nothing => Ok(()),
            Outcome::Rerender(views) => render_feed(&self.document, &self.feed, &views),
            Outcome::CommentAdded(views) => {
                if let Some(input) = source {
                    input.set_value("");
                }
                render_feed(&self.document, &self.feed, &views)
            }
            Outcome::PostCreated(views) => {
                self.post_input.set_value("");
                self.media_input.set_value("");
                render_feed(&self.document, &self.feed, &views)
            }
            Outcome::PanelToggled { index, expanded } => {
                if let Some(panel) = self.document.get_element_by_id(&format!("comment-{}", index)) {
                    panel.dyn_into::<HtmlElement>()?.set_hidden(!expanded);
                }
                Ok(())
            }
            Outcome::CopyToClipboard(text) => {
                wasm_bindgen_futures::spawn_local(async move {
                    match copy_to_clipboard(&text).await {
                        Ok(()) => alert(SHARE_CONFIRMATION),
                        Err(err) => report(&err),
                    }
                });
                Ok(())
            }
            Outcome::Warn(message) => {
                alert(&message);
                Ok(())
            }
        }
    }

    fn on_feed_click(&self, event: &Event) -> Result<(), JsValue> {
        let target = match event_element(event) {
            Some(target) => target,
            None => return Ok(()),
        };

        for attribute in CLICK_DATA_ATTRIBUTES {
            if let Some(value) = target.get_attribute(&format!("data-{}", attribute)) {
                if let Some(feed_event) = FeedEvent::from_click_data(attribute, &value) {
                    return self.dispatch(feed_event, None);
                }
            }
        }
        Ok(())
    }

    fn on_feed_keydown(&self, event: &Event) -> Result<(), JsValue> {
        let is_enter = event
            .dyn_ref::<KeyboardEvent>()
            .map(|key_event| key_event.key() == "Enter")
            .unwrap_or(false);
        if !is_enter {
            return Ok(());
        }

        let input = match event_element(event).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) {
            Some(input) => input,
            None => return Ok(()),
        };
        let index = match input.get_attribute("data-input").and_then(|v| v.parse().ok()) {
            Some(index) => index,
            None => return Ok(()),
        };

        self.dispatch(FeedEvent::SubmitComment(index, input.value()), Some(&input))
    }

    fn on_submit_post(&self) -> Result<(), JsValue> {
        let media = match self.media_input.files().and_then(|files| files.get(0)) {
            Some(file) => Some(MediaSelection {
                uri: Url::create_object_url_with_blob(&file)?,
                mime_type: file.type_(),
            }),
            None => None,
        };
        let selected_uri = media.as_ref().map(|selection| selection.uri.clone());

        let result = self.presenter.borrow_mut().handle(FeedEvent::SubmitPost {
            text: self.post_input.value(),
            media,
        });

        let created = matches!(result, Ok(Outcome::PostCreated(_)));
        if let (false, Some(uri)) = (created, selected_uri) {
            Url::revoke_object_url(&uri)?;
        }

        match result {
            Ok(outcome) => self.apply(outcome, None),
            Err(err) => {
                report(&err);
                Ok(())
            }
        }
    }

    fn apply_theme(&self, theme: Theme) -> Result<(), JsValue> {
        self.body
            .class_list()
            .toggle_with_force("dark", theme == Theme::Dark)?;
        self.theme_toggle.set_text_content(Some(theme.toggle_glyph()));
        Ok(())
    }

    fn on_theme_toggle(&self) -> Result<(), JsValue> {
        let result = self.theme.borrow_mut().toggle();
        match result {
            Ok(theme) => self.apply_theme(theme),
            Err(err) => {
                report(&err);
                Ok(())
            }
        }
    }

    fn on_nav(&self, item: &Element) -> Result<(), JsValue> {
        for nav_item in &self.nav_items {
            nav_item.class_list().remove_1("active")?;
        }
        item.class_list().add_1("active")?;

        let section = match item.get_attribute("data-action").and_then(|a| Section::from_action(&a)) {
            Some(section) => section,
            None => return Ok(()),
        };
        debug!("navigating to {:?}", section);

        if let Some(title) = section.placeholder_title() {
            return self.show_card(title);
        }
        match section {
            Section::Home => self.render(),
            Section::Search => self.open_search(),
            Section::Create => {
                self.media_input.click();
                self.post_input.focus()
            }
            Section::Profile => self.show_card(&self.config.current_user.name),
            Section::Menu => self.toggle_menu(),
            _ => Ok(()),
        }
    }

    fn show_card(&self, title: &str) -> Result<(), JsValue> {
        self.feed.set_inner_html("");
        let card = element(&self.document, "div", "card")?;
        let heading = text_element(&self.document, "h3", "", title)?;
        card.append_child(&heading)?;
        self.feed.append_child(&card)?;
        Ok(())
    }

    fn toggle_menu(&self) -> Result<(), JsValue> {
        if let Some(menu) = self.document.get_element_by_id("menu-popup") {
            menu.remove();
            return Ok(());
        }

        let menu = element(&self.document, "div", "")?;
        menu.set_id("menu-popup");
        for label in MENU_ITEMS {
            let menu_item = text_element(&self.document, "div", "menu-item", label)?;
            menu.append_child(&menu_item)?;
        }
        self.body.append_child(&menu)?;
        Ok(())
    }

    fn open_search(&self) -> Result<(), JsValue> {
        self.search_overlay.class_list().add_1("active")?;
        self.search_overlay.set_hidden(false);
        self.search_input.set_value("");
        self.search_results.set_inner_html("");
        self.search_input.focus()
    }

    fn close_search(&self) -> Result<(), JsValue> {
        self.search_overlay.set_hidden(true);
        self.search_overlay.class_list().remove_1("active")
    }

    fn on_search_input(&self) -> Result<(), JsValue> {
        self.search_results.set_inner_html("");

        let profiles = search_profiles(
            self.presenter.borrow().store().posts(),
            &self.search_input.value(),
        );
        for profile in profiles {
            let row = element(&self.document, "div", "search-result")?;
            let avatar = text_element(&self.document, "div", "avatar", &profile.avatar)?;
            row.append_child(&avatar)?;
            let username = text_element(&self.document, "span", "", &profile.username)?;
            row.append_child(&username)?;
            self.search_results.append_child(&row)?;
        }
        Ok(())
    }
}
