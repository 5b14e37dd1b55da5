//! CLI command definitions and handlers

use clap::{Args, Subcommand};
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::info;

use crate::core::client::DeepLClient;
use crate::core::config::ClientConfig;
use crate::core::errors::{DeepLError, Result};
use crate::core::models::{Formal, Language, SplitSentence, TagHandling, Translation};
use crate::core::options::TranslateOptions;

/// Commands for the DeepL CLI
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate one or more texts
    Translate(TranslateArgs),

    /// List known language codes
    Languages,
}

/// Arguments of the `translate` command
#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Texts to translate, one request for all of them
    #[arg(required = true)]
    pub texts: Vec<String>,

    /// Target language (e.g. DE, EN-GB)
    #[arg(short, long)]
    pub target_lang: Language,

    /// Source language (auto-detect if not specified)
    #[arg(short, long)]
    pub source_lang: Option<Language>,

    /// Sentence splitting: 0, 1 or nonewlines
    #[arg(long)]
    pub split_sentences: Option<SplitSentence>,

    /// Keep the original formatting: true or false
    #[arg(long)]
    pub preserve_formatting: Option<bool>,

    /// Formality: default, less or more
    #[arg(long)]
    pub formality: Option<Formal>,

    /// Tag handling: xml or html
    #[arg(long)]
    pub tag_handling: Option<TagHandling>,

    /// Prefix each line with the detected source language
    #[arg(long)]
    pub show_detected: bool,
}

impl TranslateArgs {
    /// Request options selected on the command line
    pub fn options(&self) -> TranslateOptions {
        let mut options = TranslateOptions::new();

        if let Some(lang) = &self.source_lang {
            options = options.source_lang(lang.clone());
        }
        if let Some(split) = self.split_sentences {
            options = options.split_sentences(split);
        }
        if let Some(preserve) = self.preserve_formatting {
            options = options.preserve_formatting(preserve);
        }
        if let Some(formal) = self.formality {
            options = options.formality(formal);
        }
        if let Some(handling) = self.tag_handling {
            options = options.tag_handling(handling);
        }

        options
    }
}

/// Handle translate command
pub async fn handle_translate(
    config: ClientConfig,
    timeout: Option<Duration>,
    args: TranslateArgs,
) -> anyhow::Result<()> {
    let start_time = Instant::now();

    info!("Target language: {}", args.target_lang);
    info!("Texts: {}", args.texts.len());

    let client = DeepLClient::new(config)?;
    let options = args.options();

    let translations = translate_interruptible(
        &client,
        ctrl_c(),
        timeout,
        &args.texts,
        &args.target_lang,
        &options,
    )
    .await?;

    for translation in &translations {
        if args.show_detected {
            println!("[{}] {}", translation.detected_source_language, translation.text);
        } else {
            println!("{}", translation.text);
        }
    }

    info!(
        "Translated {} text(s) in {:?}",
        translations.len(),
        start_time.elapsed()
    );

    Ok(())
}

/// Resolves once Ctrl-C is pressed; never if the handler cannot be installed
async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Send the request, abandoning it on `interrupt` or once `timeout` elapses
pub async fn translate_interruptible<F>(
    client: &DeepLClient,
    interrupt: F,
    timeout: Option<Duration>,
    texts: &[String],
    target_lang: &Language,
    options: &TranslateOptions,
) -> Result<Vec<Translation>>
where
    F: Future<Output = ()>,
{
    let request = client.translate_many_until(interrupt, texts, target_lang, options);

    match timeout {
        Some(deadline) => tokio::time::timeout(deadline, request)
            .await
            .map_err(|_| DeepLError::Timeout)?,
        None => request.await,
    }
}

/// Handle languages command
pub fn handle_languages() {
    for (lang, name) in Language::KNOWN {
        println!("  {:6} {}", lang.code(), name);
    }
}
