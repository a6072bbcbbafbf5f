use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, HtmlMediaElement};

use crate::dom;
use crate::error::{describe, SiteError};

pub const CARD_SELECTOR: &str = ".portfolio-card";
pub const VIDEO_SELECTOR: &str = ".hover-video";

pub trait Playback {
    fn start(&self) -> Result<(), SiteError>;
    fn halt(&self) -> Result<(), SiteError>;
    fn rewind(&self);
}

impl Playback for HtmlMediaElement {
    /// `play()` settles later; an autoplay refusal shows up as a rejected
    /// promise and is logged from the spawned task.
    fn start(&self) -> Result<(), SiteError> {
        let promise = self.play()?;
        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                warn!("Video play failed: {}", describe(&err));
            }
        });
        Ok(())
    }

    fn halt(&self) -> Result<(), SiteError> {
        Ok(self.pause()?)
    }

    fn rewind(&self) {
        self.set_current_time(0.0);
    }
}

pub fn on_enter<P: Playback>(player: &P) {
    if let Err(err) = player.start() {
        warn!("Video play failed: {}", err);
    }
}

pub fn on_leave<P: Playback>(player: &P) {
    if let Err(err) = player.halt() {
        debug!("Video pause failed: {}", err);
    }
    player.rewind();
}

pub fn mount(document: &Document) {
    let mut wired = 0;
    for card in dom::select_all(document, CARD_SELECTOR) {
        let Some(video) = card
            .query_selector(VIDEO_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlMediaElement>().ok())
        else {
            continue;
        };
        let player = video.clone();
        dom::listen(&card, "mouseenter", move |_| on_enter(&player));
        dom::listen(&card, "mouseleave", move |_| on_leave(&video));
        wired += 1;
    }
    debug!("Hover playback on {} portfolio cards", wired);
}
