//! Interactive question wiring over cliclack

use crate::config::{resolve, DefaultsSource, Question, QuestionSource, RawOptions};
use crate::orchestrator::{run_pipeline, ScaffoldPlan};
use crate::pipeline::ProcessDriver;
use crate::templates::OverwritePolicy;
use anyhow::Result;

/// Asks each unanswered question with the computed default pre-filled.
/// The question's validator re-asks inline until the input passes.
pub struct PromptSource;

impl QuestionSource for PromptSource {
    fn ask(&mut self, question: &Question) -> Result<String> {
        let mut input = cliclack::input(question.prompt);

        if !question.default.is_empty() {
            input = input
                .placeholder(&question.default)
                .default_input(&question.default);
        }

        if let Some(validator) = question.validator {
            input = input.validate(move |value: &String| validator(value));
        }

        let answer: String = input.interact()?;
        Ok(answer)
    }
}

/// Run the full scaffold flow: resolve configuration (prompting for every
/// field not covered by a flag, or accepting all defaults with `yes`), then
/// drive the pipeline.
pub async fn run(options: &RawOptions, yes: bool, policy: OverwritePolicy) -> Result<()> {
    cliclack::intro("create-itk-app")?;
    cliclack::log::info("Let's create an itk.js app! Hit enter to accept the suggestion.")?;

    let config = if yes {
        resolve(options, &mut DefaultsSource)?
    } else {
        resolve(options, &mut PromptSource)?
    };

    cliclack::log::info(format!(
        "Scaffolding {} into {}",
        config.app_name,
        config.destination.display()
    ))?;

    let plan = ScaffoldPlan::for_config(&config);
    let driver = ProcessDriver::new();
    let report = run_pipeline(&config, &plan, &driver, policy).await?;

    if report.committed() {
        cliclack::log::success("Initial commit recorded")?;
    }

    cliclack::outro("Happy coding!")?;
    Ok(())
}
