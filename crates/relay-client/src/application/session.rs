//! RelaySession: turns input lines into outgoing messages on the session
//! channel.
//!
//! The session is single-threaded and strictly sequential: one input line is
//! fully processed — classified, encoded, and every resulting message sent —
//! before the next line is read.  The channel is exclusively owned by the
//! session, so no locking discipline is needed and transmission order is
//! exactly line order, frame order, character order.
//!
//! A transmission failure at any point is fatal to the run: the remaining
//! frames of the current line are not sent, nothing is retried or queued,
//! and the error propagates out of [`run_relay`].

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use relay_core::{
    comment_message, encode_command, is_command, substitute_command, EncodeError, EncodingMode,
    KeyMapping,
};

/// Error type for channel send operations.
///
/// The application layer never sees transport specifics; the infrastructure
/// implementation folds them into this one variant.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("transport error: {0}")]
    Transport(String),
}

/// An open duplex connection able to send discrete binary and text messages.
///
/// Both sends are synchronous from the session's point of view: the call
/// resolves when the message has been handed to the transport, and any
/// failure is unrecoverable for the current run.  Connection lifecycle
/// (dial, close) is the surrounding program's responsibility.
#[async_trait]
pub trait SessionChannel: Send {
    /// Sends one complete binary message (a single event frame).
    async fn send_binary(&mut self, bytes: Vec<u8>) -> Result<(), ChannelError>;

    /// Sends one complete text message (a comment or substituted command).
    async fn send_text(&mut self, text: String) -> Result<(), ChannelError>;
}

/// Errors that end a relay run.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Encoding failed — either the classifier/encoder contract was violated
    /// or the session identifier does not fit a frame.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// A binary frame send failed mid-line.  Frames after `frame_index` were
    /// not sent.
    #[error("failed to send frame {frame_index} of {frame_count}: {source}")]
    FrameSend {
        frame_index: usize,
        frame_count: usize,
        #[source]
        source: ChannelError,
    },

    /// A text message send failed.
    #[error("failed to send text message: {0}")]
    TextSend(#[source] ChannelError),

    /// Reading from the input stream failed.
    #[error("failed to read input line: {0}")]
    Input(#[from] std::io::Error),
}

/// What one processed line produced, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// A command line encoded as binary event frames; all were sent.
    Command { frames_sent: usize },
    /// A command line sent as one digit-substituted text message.
    SubstitutedCommand,
    /// A comment line sent as one tagged text message.
    Comment,
}

/// One relay session: an owned channel plus the immutable per-session state
/// (identifier, key mapping, encoding mode).
pub struct RelaySession<C: SessionChannel> {
    channel: C,
    session_id: String,
    mapping: KeyMapping,
    mode: EncodingMode,
}

impl<C: SessionChannel> RelaySession<C> {
    /// Creates a session over an already-connected channel.
    pub fn new(channel: C, session_id: String, mapping: KeyMapping, mode: EncodingMode) -> Self {
        Self {
            channel,
            session_id,
            mapping,
            mode,
        }
    }

    /// Fully processes one input line: classify, encode, transmit.
    ///
    /// Command lines produce their messages in strict order — per character,
    /// press frame then release frame, characters left to right.  Each frame
    /// is sent as soon as it is built; frames are not batched.  Comment
    /// lines produce exactly one tagged text message, verbatim.
    ///
    /// # Errors
    ///
    /// Any send failure aborts the remaining messages of this line and is
    /// returned to the caller; the session must not be used afterwards.
    pub async fn process_line(&mut self, line: &str) -> Result<LineOutcome, SessionError> {
        if is_command(line, &self.mapping) {
            match self.mode {
                EncodingMode::EventFrames => {
                    let frames = encode_command(&self.session_id, line, &self.mapping)?;
                    let frame_count = frames.len();
                    for (index, frame) in frames.into_iter().enumerate() {
                        self.channel.send_binary(frame).await.map_err(|source| {
                            SessionError::FrameSend {
                                frame_index: index + 1,
                                frame_count,
                                source,
                            }
                        })?;
                    }
                    debug!(frames = frame_count, "command line relayed");
                    Ok(LineOutcome::Command {
                        frames_sent: frame_count,
                    })
                }
                EncodingMode::DigitSubstitution => {
                    let text = substitute_command(&self.session_id, line, &self.mapping)?;
                    self.channel
                        .send_text(text)
                        .await
                        .map_err(SessionError::TextSend)?;
                    debug!("command line relayed (digit substitution)");
                    Ok(LineOutcome::SubstitutedCommand)
                }
            }
        } else {
            let text = comment_message(&self.session_id, line);
            self.channel
                .send_text(text)
                .await
                .map_err(SessionError::TextSend)?;
            debug!("comment line relayed");
            Ok(LineOutcome::Comment)
        }
    }

    /// Releases the underlying channel so the caller can close it.
    pub fn into_channel(self) -> C {
        self.channel
    }
}

/// Runs the relay loop: reads `input` line by line and fully processes each
/// line before reading the next.
///
/// Returns `Ok(())` on end of input (the clean way to end a session) and the
/// first [`SessionError`] otherwise — a transmission failure terminates the
/// loop rather than being retried, and unsent lines are not replayed.
pub async fn run_relay<C, R>(
    session: &mut RelaySession<C>,
    input: R,
) -> Result<(), SessionError>
where
    C: SessionChannel,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        session.process_line(&line).await?;
    }
    debug!("input closed; relay loop finished");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::{EventFrame, KeyState};
    use tokio::io::BufReader;

    /// What one send call carried, in the order the channel saw it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Sent {
        Binary(Vec<u8>),
        Text(String),
    }

    /// Recording channel with optional failure injection: the `fail_on`-th
    /// send attempt (1-based, counting both kinds) returns an error.
    #[derive(Default)]
    struct RecordingChannel {
        sent: Vec<Sent>,
        attempts: usize,
        fail_on: Option<usize>,
    }

    impl RecordingChannel {
        fn failing_on(n: usize) -> Self {
            Self {
                fail_on: Some(n),
                ..Self::default()
            }
        }

        fn check(&mut self) -> Result<(), ChannelError> {
            self.attempts += 1;
            if self.fail_on == Some(self.attempts) {
                return Err(ChannelError::Transport("connection reset".to_string()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl SessionChannel for RecordingChannel {
        async fn send_binary(&mut self, bytes: Vec<u8>) -> Result<(), ChannelError> {
            self.check()?;
            self.sent.push(Sent::Binary(bytes));
            Ok(())
        }

        async fn send_text(&mut self, text: String) -> Result<(), ChannelError> {
            self.check()?;
            self.sent.push(Sent::Text(text));
            Ok(())
        }
    }

    fn session(channel: RecordingChannel, mode: EncodingMode) -> RelaySession<RecordingChannel> {
        RelaySession::new(channel, "42".to_string(), KeyMapping::default(), mode)
    }

    #[tokio::test]
    async fn test_command_line_sends_press_release_pairs_in_order() {
        let mut s = session(RecordingChannel::default(), EncodingMode::EventFrames);

        let outcome = s.process_line("hk").await.unwrap();

        assert_eq!(outcome, LineOutcome::Command { frames_sent: 4 });
        let sent = s.into_channel().sent;
        assert_eq!(sent.len(), 4);
        let states_and_opcodes: Vec<(KeyState, u8)> = sent
            .iter()
            .map(|m| match m {
                Sent::Binary(bytes) => {
                    let (frame, _) = EventFrame::decode(bytes).unwrap();
                    (frame.state, frame.action.opcode())
                }
                Sent::Text(_) => panic!("command frames must be binary"),
            })
            .collect();
        assert_eq!(
            states_and_opcodes,
            vec![
                (KeyState::Pressed, 1),  // h press  (Left)
                (KeyState::Released, 1), // h release
                (KeyState::Pressed, 3),  // k press  (Up)
                (KeyState::Released, 3), // k release
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_command_line_sends_nothing() {
        let mut s = session(RecordingChannel::default(), EncodingMode::EventFrames);

        let outcome = s.process_line("").await.unwrap();

        assert_eq!(outcome, LineOutcome::Command { frames_sent: 0 });
        assert!(s.into_channel().sent.is_empty());
    }

    #[tokio::test]
    async fn test_comment_line_sends_one_tagged_text_message() {
        let mut s = session(RecordingChannel::default(), EncodingMode::EventFrames);

        let outcome = s.process_line("gg well played").await.unwrap();

        assert_eq!(outcome, LineOutcome::Comment);
        assert_eq!(
            s.into_channel().sent,
            vec![Sent::Text("42\tgg well played".to_string())]
        );
    }

    #[tokio::test]
    async fn test_send_failure_mid_line_aborts_remaining_frames() {
        // "hjk" is 6 frames; the 3rd send fails, so 4..6 must never be tried.
        let mut s = session(RecordingChannel::failing_on(3), EncodingMode::EventFrames);

        let err = s.process_line("hjk").await.unwrap_err();

        match err {
            SessionError::FrameSend {
                frame_index,
                frame_count,
                ..
            } => {
                assert_eq!(frame_index, 3);
                assert_eq!(frame_count, 6);
            }
            other => panic!("expected FrameSend, got {other:?}"),
        }
        let channel = s.into_channel();
        assert_eq!(channel.attempts, 3, "no send attempted after the failure");
        assert_eq!(channel.sent.len(), 2, "only the frames before the failure went out");
    }

    #[tokio::test]
    async fn test_comment_send_failure_propagates() {
        let mut s = session(RecordingChannel::failing_on(1), EncodingMode::EventFrames);

        let err = s.process_line("hello there").await.unwrap_err();

        assert!(matches!(err, SessionError::TextSend(_)));
    }

    #[tokio::test]
    async fn test_substitution_mode_sends_one_text_message() {
        let mut s = session(
            RecordingChannel::default(),
            EncodingMode::DigitSubstitution,
        );

        let outcome = s.process_line("hjkl ").await.unwrap();

        assert_eq!(outcome, LineOutcome::SubstitutedCommand);
        assert_eq!(
            s.into_channel().sent,
            vec![Sent::Text("42\t42865".to_string())]
        );
    }

    #[tokio::test]
    async fn test_substitution_mode_still_relays_comments_verbatim() {
        let mut s = session(
            RecordingChannel::default(),
            EncodingMode::DigitSubstitution,
        );

        let outcome = s.process_line("nice one").await.unwrap();

        assert_eq!(outcome, LineOutcome::Comment);
        assert_eq!(
            s.into_channel().sent,
            vec![Sent::Text("42\tnice one".to_string())]
        );
    }

    #[tokio::test]
    async fn test_run_relay_processes_lines_in_order_until_eof() {
        let input = BufReader::new(&b"h\ngg\n"[..]);
        let mut s = session(RecordingChannel::default(), EncodingMode::EventFrames);

        run_relay(&mut s, input).await.unwrap();

        let sent = s.into_channel().sent;
        // "h" → 2 binary frames, then "gg" → 1 text message, in that order.
        assert_eq!(sent.len(), 3);
        assert!(matches!(sent[0], Sent::Binary(_)));
        assert!(matches!(sent[1], Sent::Binary(_)));
        assert_eq!(sent[2], Sent::Text("42\tgg".to_string()));
    }

    #[tokio::test]
    async fn test_run_relay_stops_at_first_transmission_failure() {
        // First line "h" succeeds (2 sends); second line's first frame (the
        // 3rd send overall) fails; the third line must never be processed.
        let input = BufReader::new(&b"h\nj\nk\n"[..]);
        let mut s = session(RecordingChannel::failing_on(3), EncodingMode::EventFrames);

        let result = run_relay(&mut s, input).await;

        assert!(matches!(result, Err(SessionError::FrameSend { .. })));
        assert_eq!(s.into_channel().attempts, 3);
    }

    #[tokio::test]
    async fn test_run_relay_handles_empty_input() {
        let input = BufReader::new(&b""[..]);
        let mut s = session(RecordingChannel::default(), EncodingMode::EventFrames);

        run_relay(&mut s, input).await.unwrap();

        assert!(s.into_channel().sent.is_empty());
    }
}
