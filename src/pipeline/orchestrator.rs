//! Sequences the four stages of one narration job.

use crate::config::Config;
use crate::error::Result;
use crate::output::Narrator;
use crate::pipeline::types::{JobReport, PipelineJob, TranslatedArticle};
use crate::process::CommandExecutor;
use crate::stages::{Article, ArticleExtractor, AudioSynthesizer, Stage, Synthesis, Translator};
use std::fs;
use std::path::Path;

/// Runs a [`PipelineJob`] against one executor and one immutable config.
pub struct Pipeline<'a, E: ?Sized> {
    config: &'a Config,
    executor: &'a E,
    narrator: Narrator,
}

impl<'a, E: CommandExecutor + ?Sized> Pipeline<'a, E> {
    pub fn new(config: &'a Config, executor: &'a E, narrator: Narrator) -> Self {
        Self {
            config,
            executor,
            narrator,
        }
    }

    /// Run every stage, persist the text artifact and report what was written.
    ///
    /// Stops at the first failing stage; files written before that point stay
    /// on disk.
    pub async fn run(&self, job: &PipelineJob) -> Result<JobReport> {
        self.narrator.job_started(&job.url, job.project_name());
        job.layout.prepare()?;

        let article = self.extract(job).await?;
        let translated = self.translate(job, article).await?;
        let synthesis = self.synthesize(job, &translated).await?;

        let report = self.persist(job, &translated, &synthesis)?;
        self.narrator.artifacts(&report);
        Ok(report)
    }

    async fn extract(&self, job: &PipelineJob) -> Result<Article> {
        let stage = Stage::Extraction;
        self.narrator.stage_started(stage);

        let debug_dir = job.layout.debug_dir(stage);
        let article = ArticleExtractor::new(self.executor, &self.config.tools.extract)
            .extract(&job.url, debug_dir.as_deref())
            .await
            .map_err(|e| e.in_stage(stage))?;

        self.narrator.stage_finished(stage, &article.title);
        Ok(article)
    }

    async fn translate(&self, job: &PipelineJob, article: Article) -> Result<TranslatedArticle> {
        let translator = Translator::new(
            self.executor,
            &self.config.tools.translate,
            &self.config.translation.banner_prefix,
        );
        let title_dir = job.layout.debug_dir(Stage::TitleTranslation);
        let content_dir = job.layout.debug_dir(Stage::ContentTranslation);

        let title = async {
            translator
                .translate_title(&article.title, title_dir.as_deref())
                .await
                .map_err(|e| e.in_stage(Stage::TitleTranslation))
        };
        let content = async {
            translator
                .translate(&article.content, content_dir.as_deref())
                .await
                .map_err(|e| e.in_stage(Stage::ContentTranslation))
        };

        let (title, content) = if self.config.translation.parallel {
            self.narrator.stage_started(Stage::TitleTranslation);
            self.narrator.stage_started(Stage::ContentTranslation);
            tokio::try_join!(title, content)?
        } else {
            self.narrator.stage_started(Stage::TitleTranslation);
            let title = title.await?;
            self.narrator.stage_started(Stage::ContentTranslation);
            (title, content.await?)
        };

        self.finish_translation(Stage::TitleTranslation, &article.title, &title);
        self.finish_translation(Stage::ContentTranslation, &article.content, &content);

        Ok(TranslatedArticle {
            title,
            content,
            source: article,
        })
    }

    fn finish_translation(&self, stage: Stage, input: &str, output: &str) {
        if input.trim().is_empty() {
            self.narrator.stage_skipped(stage, "nothing to translate");
        } else {
            self.narrator
                .stage_finished(stage, &format!("{} chars", output.chars().count()));
        }
    }

    async fn synthesize(&self, job: &PipelineJob, article: &TranslatedArticle) -> Result<Synthesis> {
        let stage = Stage::Synthesis;
        self.narrator.stage_started(stage);

        let debug_dir = job.layout.debug_dir(stage);
        let synthesis = AudioSynthesizer::new(
            self.executor,
            self.config.synthesis_command(),
            self.config.tts.engine,
            &self.config.tts.openai_model,
        )
        .synthesize(&article.narration(), &job.layout.audio_path, debug_dir.as_deref())
        .await
        .map_err(|e| e.in_stage(stage))?;

        match &synthesis {
            Synthesis::Written(path) => {
                self.narrator
                    .stage_finished(stage, &path.display().to_string());
            }
            Synthesis::Skipped => self.narrator.stage_skipped(stage, "no narration text"),
        }
        Ok(synthesis)
    }

    fn persist(
        &self,
        job: &PipelineJob,
        article: &TranslatedArticle,
        synthesis: &Synthesis,
    ) -> Result<JobReport> {
        let layout = &job.layout;

        if let Some(path) = &layout.text_path {
            write_artifact(path, &article.text_artifact())?;
        }
        if let Some(path) = &layout.title_path {
            write_artifact(path, &article.title)?;
        }
        if let Some(path) = &layout.content_path {
            write_artifact(path, &article.content)?;
        }

        Ok(JobReport {
            text_path: layout.text_path.clone(),
            title_path: layout.title_path.clone(),
            content_path: layout.content_path.clone(),
            audio_path: synthesis.path().map(Path::to_path_buf),
            debug_root: layout.debug_root.clone(),
        })
    }
}

fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "artifact written");
    Ok(())
}
