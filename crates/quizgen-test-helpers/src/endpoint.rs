use async_trait::async_trait;
use quizgen_core::{Completion, GenerationRequest, QuizEndpoint, TransportError};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Endpoint replaying scripted replies in order and recording every request it receives.
///
/// Once the script is exhausted every further call fails with [`TransportError::EmptyResponse`].
#[derive(Default)]
pub struct ScriptedEndpoint {
    replies: Mutex<VecDeque<Result<String, TransportError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    delay: Option<Duration>,
}

impl ScriptedEndpoint {
    pub fn new<I: IntoIterator<Item = Result<String, TransportError>>>(replies: I) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Self::default()
        }
    }

    /// A single successful reply.
    pub fn replying(content: impl Into<String>) -> Self {
        Self::new([Ok(content.into())])
    }

    /// Sleeps before answering, to exercise timeouts.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuizEndpoint for ScriptedEndpoint {
    async fn complete(&self, request: &GenerationRequest) -> Result<Completion, TransportError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(delay) = self.delay {
            tracing::debug!(?delay, "delaying scripted reply");
            tokio::time::sleep(delay).await;
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TransportError::EmptyResponse));
        reply.map(Completion::new)
    }
}
