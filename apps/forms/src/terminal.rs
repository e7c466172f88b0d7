//! Line-oriented driver: prompts each field, shows inline errors and toasts.

use folio_application::{FormSpec, SubmissionController, SubmitOutcome};
use folio_core::{AppError, AppResult};
use folio_domain::NotificationVariant;
use folio_infrastructure::RecordingToastSurface;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

struct Console {
    input: Lines<BufReader<Stdin>>,
    output: Stdout,
}

impl Console {
    async fn write(&mut self, text: &str) -> AppResult<()> {
        self.output
            .write_all(text.as_bytes())
            .await
            .map_err(|error| AppError::Internal(format!("failed to write to stdout: {error}")))?;
        self.output
            .flush()
            .await
            .map_err(|error| AppError::Internal(format!("failed to flush stdout: {error}")))
    }

    async fn read_line(&mut self) -> AppResult<Option<String>> {
        self.input
            .next_line()
            .await
            .map_err(|error| AppError::Internal(format!("failed to read stdin: {error}")))
    }
}

/// Fills and submits one form until it settles or input ends.
pub async fn run<F: FormSpec>(
    controller: &SubmissionController<F>,
    toasts: &RecordingToastSurface,
) -> AppResult<()> {
    let mut console = Console {
        input: BufReader::new(tokio::io::stdin()).lines(),
        output: tokio::io::stdout(),
    };
    let schema = controller.schema();
    let mut pending: Vec<&str> = schema.fields().iter().map(|field| field.name()).collect();

    loop {
        for name in pending.drain(..) {
            let label = schema.field(name).map_or(name, |field| field.label());
            if let Some(message) = controller.field_error(name)? {
                console.write(&format!("  ! {message}\n")).await?;
            }
            console.write(&format!("{label}: ")).await?;
            let Some(line) = console.read_line().await? else {
                return Ok(());
            };
            controller.set_value(name, line)?;
        }

        let outcome = controller.submit().await?;
        for event in toasts.drain() {
            let marker = match event.variant {
                NotificationVariant::Default => "ok",
                NotificationVariant::Destructive => "error",
            };
            console.write(&format!("[{marker}] {}\n", event.title)).await?;
            if let Some(description) = event.description.as_deref() {
                console.write(&format!("        {description}\n")).await?;
            }
        }

        match outcome {
            SubmitOutcome::Invalid(errors) => {
                pending = errors
                    .as_slice()
                    .iter()
                    .filter_map(|error| schema.field(&error.field).map(|field| field.name()))
                    .collect();
            }
            SubmitOutcome::Succeeded(_) => return Ok(()),
            SubmitOutcome::Rejected(_) | SubmitOutcome::Unreachable(_) => {
                console
                    .write("Press enter to retry with the same input, or Ctrl-D to quit.\n")
                    .await?;
                if console.read_line().await?.is_none() {
                    return Ok(());
                }
            }
            SubmitOutcome::Ignored => {}
        }
    }
}
