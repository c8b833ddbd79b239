//! `batchview browse` command implementation
//!
//! Interactive session over one view state: the batch list is loaded once,
//! then the user selects batches, uploads files and pages through rows until
//! they quit.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::file::FileHandle;
use crate::render::{batch_choices, render_view, NO_SELECTION};
use crate::view_state::{ViewState, ViewStateManager, ViewStatus};
use batchview_common::BatchId;
use colored::Colorize;
use inquire::{InquireError, Select, Text};
use std::fmt;
use std::io::IsTerminal;
use tracing::debug;

/// Menu entries; only the applicable ones are offered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    SelectBatch,
    Upload,
    NextPage,
    PrevPage,
    RetryUpload,
    ClearSelection,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::SelectBatch => "Select a batch",
            Action::Upload => "Upload a file",
            Action::NextPage => "Next page",
            Action::PrevPage => "Previous page",
            Action::RetryUpload => "Retry the interrupted upload",
            Action::ClearSelection => "Clear selection",
            Action::Quit => "Quit",
        };
        f.write_str(label)
    }
}

fn actions(view: &ViewState) -> Vec<Action> {
    let mut actions = vec![Action::SelectBatch, Action::Upload];
    let page = view.page();

    if page.has_next() {
        actions.push(Action::NextPage);
    }
    if page.has_prev() {
        actions.push(Action::PrevPage);
    }
    if view.status() == ViewStatus::Failed && view.pending_upload().is_some() {
        actions.push(Action::RetryUpload);
    }
    if view.selected_batch().is_some() {
        actions.push(Action::ClearSelection);
    }
    actions.push(Action::Quit);
    actions
}

pub async fn run(config: &Config) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::config(
            "browse needs an interactive terminal; use 'batchview show' instead",
        ));
    }

    let manager = super::connect(config)?;

    // A failed batch list still leaves upload and direct selection usable.
    if let Err(e) = manager.startup().await {
        debug!(error = %e, "Starting without a batch list");
    }

    loop {
        let view = manager.snapshot();
        println!();
        print!("{}", render_view(&view));

        let Some(action) = prompt(Select::new("What next?", actions(&view)).prompt())? else {
            break;
        };

        let result = match action {
            Action::SelectBatch => select_batch(&manager, &view).await,
            Action::Upload => upload_file(&manager).await,
            Action::NextPage => {
                manager.next_page();
                Ok(())
            },
            Action::PrevPage => {
                manager.prev_page();
                Ok(())
            },
            Action::RetryUpload => manager.retry_upload().await,
            Action::ClearSelection => {
                manager.clear_selection();
                Ok(())
            },
            Action::Quit => break,
        };

        // Failures are already part of the view state and show up on redraw.
        if let Err(e) = result {
            debug!(error = %e, "Action failed");
        }
    }

    println!("{}", "Bye.".dimmed());
    Ok(())
}

async fn select_batch(manager: &ViewStateManager, view: &ViewState) -> Result<()> {
    let choices = batch_choices(view.known_batches());
    let Some(choice) = prompt(Select::new("Batch", choices).prompt())? else {
        return Ok(());
    };

    if choice == NO_SELECTION {
        manager.clear_selection();
        return Ok(());
    }
    manager.select_batch(BatchId::new(choice)?).await
}

async fn upload_file(manager: &ViewStateManager) -> Result<()> {
    let Some(path) = prompt(Text::new("Path to spreadsheet (.xls, .xlsx)").prompt())? else {
        return Ok(());
    };

    let file = match FileHandle::open(path.trim()).await {
        Ok(file) => file,
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            return Ok(());
        },
    };
    super::upload::upload_with_progress(manager, file).await
}

/// Escape and Ctrl-C end the prompt without an error
fn prompt<T>(answer: std::result::Result<T, InquireError>) -> Result<Option<T>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(anyhow::Error::from(e).into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::testing::{self, batch, spreadsheet, FakeService};
    use std::sync::Arc;

    fn manager(service: FakeService) -> (ViewStateManager, Arc<FakeService>) {
        let service = Arc::new(service);
        (ViewStateManager::new(service.clone(), &Config::default()).unwrap(), service)
    }

    #[test]
    fn test_prompt_cancel_is_not_an_error() {
        let answer: std::result::Result<String, _> = Err(InquireError::OperationCanceled);
        assert!(prompt(answer).unwrap().is_none());
        assert_eq!(prompt(Ok(3)).unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_actions_follow_view_state() {
        let (manager, service) = manager(FakeService::new().with_rows("b-1", 65));
        assert_eq!(
            actions(&manager.snapshot()),
            [Action::SelectBatch, Action::Upload, Action::Quit]
        );

        manager.select_batch(batch("b-1")).await.unwrap();
        assert_eq!(
            actions(&manager.snapshot()),
            [
                Action::SelectBatch,
                Action::Upload,
                Action::NextPage,
                Action::ClearSelection,
                Action::Quit
            ]
        );

        manager.go_to_page(2);
        let view = manager.snapshot();
        assert!(actions(&view).contains(&Action::PrevPage));
        assert!(!actions(&view).contains(&Action::NextPage));

        service.fail(testing::PROCESS);
        manager.upload(spreadsheet(10)).await.unwrap_err();
        assert!(actions(&manager.snapshot()).contains(&Action::RetryUpload));
    }
}
