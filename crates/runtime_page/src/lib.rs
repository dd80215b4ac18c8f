use bus::{ContentRequest, ContentResponse, PageRequest, decode_request, encode_response};
use highlight::{HighlightSession, KeywordSpec};
use html::Document;
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Idle,
    Highlighted,
}

/// The page-side command handler. Owns the document for the lifetime of the
/// page and processes one request to completion before the next.
#[derive(Debug)]
pub struct ContentScript {
    document: Document,
    session: HighlightSession,
    state: PageState,
}

impl ContentScript {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            session: HighlightSession::new(),
            state: PageState::Idle,
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn handle(&mut self, request: ContentRequest) -> ContentResponse {
        // Every command starts from an unhighlighted page.
        let stats = self.session.clear(&mut self.document);
        self.state = PageState::Idle;
        log::debug!(
            target: "runtime_page",
            "cleared: restored={} skipped={} swept={}",
            stats.restored,
            stats.skipped,
            stats.swept
        );

        match request {
            ContentRequest::Highlight { keywords, colors } => {
                let specs = KeywordSpec::pair_with_colors(&keywords, &colors);
                let matches = self.session.apply(&mut self.document, &specs);
                self.state = PageState::Highlighted;
                log::info!(
                    target: "runtime_page",
                    "highlighted {} keywords, {} matches",
                    matches.len(),
                    matches.total()
                );
                ContentResponse::Matches { matches }
            }
            ContentRequest::Clear => ContentResponse::cleared(),
        }
    }

    /// Handles one JSON-encoded request. Undecodable requests get no answer.
    pub fn handle_json(&mut self, raw: &str) -> Option<String> {
        let request = match decode_request(raw) {
            Ok(request) => request,
            Err(err) => {
                log::warn!(target: "runtime_page", "ignoring request: {err}");
                return None;
            }
        };
        let response = self.handle(request);
        match encode_response(&response) {
            Ok(json) => Some(json),
            Err(err) => {
                log::error!(target: "runtime_page", "failed to encode response: {err}");
                None
            }
        }
    }
}

/// Runs the page script on its own thread until every client is dropped,
/// then hands the document back.
pub fn start_page_runtime(document: Document, rx: Receiver<PageRequest>) -> JoinHandle<Document> {
    thread::spawn(move || {
        let mut script = ContentScript::new(document);
        while let Ok(PageRequest {
            request_id,
            request,
            reply,
        }) = rx.recv()
        {
            log::trace!(target: "runtime_page", "request {request_id}: {request:?}");
            let response = script.handle(request);
            if let Err(err) = reply.respond(response) {
                log::debug!(target: "runtime_page", "{err}");
            }
        }
        script.into_document()
    })
}
