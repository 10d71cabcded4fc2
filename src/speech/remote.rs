//! Remote text-to-speech over HTTP

use std::process::Stdio;
use std::sync::{Arc, Mutex};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::config::RemoteVoiceConfig;
use crate::speech::SpeechSink;
use crate::{Error, Result};

/// Synthesizes speech through an OpenAI-compatible `/audio/speech` endpoint
#[derive(Debug, Clone)]
pub struct TextToSpeech {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    voice: String,
    response_format: String,
    speed: f32,
}

impl TextToSpeech {
    /// Create a TTS client
    ///
    /// # Errors
    ///
    /// Returns error if API key is missing
    pub fn new(config: &RemoteVoiceConfig) -> Result<Self> {
        let api_key = config.api_key.clone().unwrap_or_default();
        if api_key.is_empty() {
            return Err(Error::Config("OpenAI API key required for TTS".to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key,
            model: config.model.clone(),
            voice: config.voice.clone(),
            response_format: config.response_format.clone(),
            speed: config.speed,
        })
    }

    /// Synthesize text to speech
    ///
    /// # Returns
    ///
    /// Audio bytes in the configured response format
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the endpoint answers non-success
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        #[derive(serde::Serialize)]
        struct TtsRequest<'a> {
            model: &'a str,
            voice: &'a str,
            input: &'a str,
            response_format: &'a str,
            speed: f32,
        }

        let request = TtsRequest {
            model: &self.model,
            voice: &self.voice,
            input: text,
            response_format: &self.response_format,
            speed: self.speed,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Tts(format!("TTS endpoint error {status}: {body}")));
        }

        let audio = response.bytes().await?;
        tracing::debug!(bytes = audio.len(), "speech synthesized");
        Ok(audio.to_vec())
    }
}

/// Speaks through [`TextToSpeech`], piping audio into a player command
///
/// Each utterance runs as a background task; a new one aborts the previous.
#[derive(Debug)]
pub struct RemoteVoice {
    tts: Arc<TextToSpeech>,
    player: Option<Arc<[String]>>,
    current: Mutex<Option<JoinHandle<()>>>,
}

impl RemoteVoice {
    /// Create a remote voice
    #[must_use]
    pub fn new(tts: TextToSpeech, player: Option<&str>) -> Self {
        let player = player
            .map(|cmd| cmd.split_whitespace().map(ToString::to_string).collect::<Vec<_>>())
            .filter(|argv| !argv.is_empty())
            .map(Arc::from);

        Self {
            tts: Arc::new(tts),
            player,
            current: Mutex::new(None),
        }
    }

    /// Create a remote voice from configuration
    ///
    /// # Errors
    ///
    /// Returns error if API key is missing
    pub fn from_config(config: &RemoteVoiceConfig) -> Result<Self> {
        Ok(Self::new(TextToSpeech::new(config)?, config.player.as_deref()))
    }

    /// The underlying TTS client
    #[must_use]
    pub fn tts(&self) -> &TextToSpeech {
        &self.tts
    }
}

impl SpeechSink for RemoteVoice {
    fn speak(&self, text: &str, language: &str) {
        let tts = Arc::clone(&self.tts);
        let player = self.player.clone();
        let text = text.to_string();
        tracing::debug!(text, language, "requesting remote speech");

        let task = tokio::spawn(async move {
            let audio = match tts.synthesize(&text).await {
                Ok(audio) => audio,
                Err(e) => {
                    tracing::warn!(error = %e, "remote speech failed");
                    return;
                }
            };

            match player {
                Some(argv) => {
                    if let Err(e) = play(&argv, &audio).await {
                        tracing::warn!(error = %e, "audio player failed");
                    }
                }
                None => tracing::info!(bytes = audio.len(), "no player configured, audio dropped"),
            }
        });

        match self.current.lock() {
            Ok(mut current) => {
                if let Some(previous) = current.replace(task) {
                    previous.abort();
                }
            }
            Err(_) => tracing::warn!("remote voice lock poisoned"),
        }
    }
}

impl Drop for RemoteVoice {
    fn drop(&mut self) {
        if let Ok(mut current) = self.current.lock()
            && let Some(task) = current.take()
        {
            task.abort();
        }
    }
}

/// Feed `audio` to the player's stdin and wait for it to exit
async fn play(argv: &[String], audio: &[u8]) -> Result<()> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| Error::Speech("empty player command".to_string()))?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| Error::Speech(format!("failed to start player {program}: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(audio).await?;
        stdin.shutdown().await?;
    }

    let status = child.wait().await?;
    if !status.success() {
        return Err(Error::Speech(format!("player exited with {status}")));
    }
    Ok(())
}
