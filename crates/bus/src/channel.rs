use crate::{BusError, ContentRequest, ContentResponse, RequestId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

/// A request travelling to the page script together with its reply slot.
#[derive(Debug)]
pub struct PageRequest {
    pub request_id: RequestId,
    pub request: ContentRequest,
    pub reply: Responder,
}

/// Single-use reply handle. Replying consumes it, so a request can be
/// answered at most once.
#[derive(Debug)]
pub struct Responder {
    request_id: RequestId,
    tx: Sender<ContentResponse>,
}

impl Responder {
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn respond(self, response: ContentResponse) -> Result<(), BusError> {
        self.tx
            .send(response)
            .map_err(|_| BusError::ReplyUndeliverable(self.request_id))
    }
}

/// Popup-side handle for sending requests to one page.
#[derive(Debug)]
pub struct PageClient {
    tx: Sender<PageRequest>,
    next_id: AtomicU64,
}

/// Creates a connected client and the receiving end the page runtime listens on.
pub fn page_channel() -> (PageClient, Receiver<PageRequest>) {
    let (tx, rx) = mpsc::channel();
    (
        PageClient {
            tx,
            next_id: AtomicU64::new(1),
        },
        rx,
    )
}

impl PageClient {
    /// Sends `request` and blocks until the page script answers it.
    pub fn send(&self, request: ContentRequest) -> Result<ContentResponse, BusError> {
        let (reply_tx, reply_rx) = mpsc::channel();
        let request_id = self.dispatch(request, reply_tx)?;
        reply_rx
            .recv()
            .map_err(|_| BusError::NoResponse(request_id))
    }

    /// Sends `request` without waiting for the answer.
    pub fn post(&self, request: ContentRequest) -> Result<RequestId, BusError> {
        let (reply_tx, _) = mpsc::channel();
        self.dispatch(request, reply_tx)
    }

    fn dispatch(
        &self,
        request: ContentRequest,
        reply_tx: Sender<ContentResponse>,
    ) -> Result<RequestId, BusError> {
        let request_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        log::trace!(target: "bus", "request {request_id}: {request:?}");
        self.tx
            .send(PageRequest {
                request_id,
                request,
                reply: Responder {
                    request_id,
                    tx: reply_tx,
                },
            })
            .map_err(|_| BusError::Disconnected)?;
        Ok(request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn send_waits_for_the_single_reply() {
        let (client, rx) = page_channel();
        let page = thread::spawn(move || {
            let envelope = rx.recv().unwrap();
            assert_eq!(envelope.request, ContentRequest::Clear);
            envelope.reply.respond(ContentResponse::cleared()).unwrap();
        });
        assert_eq!(
            client.send(ContentRequest::Clear).unwrap(),
            ContentResponse::cleared()
        );
        page.join().unwrap();
    }

    #[test]
    fn dropped_responder_surfaces_as_no_response() {
        let (client, rx) = page_channel();
        let page = thread::spawn(move || {
            let envelope = rx.recv().unwrap();
            envelope.request_id
        });
        let err = client.send(ContentRequest::Clear).unwrap_err();
        let id = page.join().unwrap();
        assert!(matches!(err, BusError::NoResponse(got) if got == id));
    }

    #[test]
    fn send_after_page_is_gone_fails() {
        let (client, rx) = page_channel();
        drop(rx);
        assert!(matches!(
            client.send(ContentRequest::Clear),
            Err(BusError::Disconnected)
        ));
    }

    #[test]
    fn posted_request_reply_goes_nowhere() {
        let (client, rx) = page_channel();
        let first = client.post(ContentRequest::Clear).unwrap();
        let second = client.post(ContentRequest::Clear).unwrap();
        assert_ne!(first, second);

        let envelope = rx.recv().unwrap();
        assert_eq!(envelope.reply.request_id(), first);
        assert!(matches!(
            envelope.reply.respond(ContentResponse::cleared()),
            Err(BusError::ReplyUndeliverable(id)) if id == first
        ));
    }
}
