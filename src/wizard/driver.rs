//! Wizard driver
//!
//! Couples a [`WizardState`] with the injected session, backend and notifier.
//! Every failure is reported through the notifier at the call site and
//! returned to the caller; none of them end the wizard.

use crate::api::JournalService;
use crate::auth::Session;
use crate::error::{Error, Result};
use crate::types::{
    AuthorField, DeclarationKind, Draft, FileToUpload, RequirementSlot, SubmitReceipt, Topic,
    UploadedFile,
};
use crate::wizard::validate::{check_draft, check_step, check_upload_batch, draft_issues};
use crate::wizard::{
    Event, NavigationPolicy, Notifier, Step, UploadStatus, UploadTicket, WizardState,
};
use tracing::{debug, info, warn};

/// Research topics offered when the topic directory can't be reached
pub const FALLBACK_TOPICS: &[&str] = &[
    "Applied Microeconomics and Macroeconomics",
    "Financial Inclusion and Sector Stability",
    "Development Economics and Sustainable Growth",
    "Public Finance and Fiscal Policy",
    "Agricultural and Rural Development",
    "Education, Economics, and Labor Markets",
    "Entrepreneurship and Innovation in Africa",
    "Economic Policy Analysis and Evaluation",
    "Environmental and Energy Economics",
    "Quantitative Modeling in Economics",
    "Other",
];

fn fallback_topics() -> Vec<Topic> {
    FALLBACK_TOPICS
        .iter()
        .enumerate()
        .map(|(i, name)| Topic {
            id: format!("builtin-{}", i + 1),
            name: (*name).to_string(),
        })
        .collect()
}

/// An upload request in flight, detached from its wizard
pub struct PendingUpload<'a> {
    ticket: UploadTicket,
    files: Vec<FileToUpload>,
    session: Session,
    service: &'a dyn JournalService,
}

impl PendingUpload<'_> {
    /// Ticket to hand back to [`Wizard::finish_upload`]
    pub const fn ticket(&self) -> UploadTicket {
        self.ticket
    }

    /// Send the batch to the upload service
    pub async fn send(self) -> (UploadTicket, Result<Vec<UploadedFile>>) {
        let result = self
            .service
            .upload_files(&self.session, self.ticket.slot(), &self.files)
            .await;
        (self.ticket, result)
    }
}

/// A mounted submission wizard
pub struct Wizard<'a> {
    state: WizardState,
    session: Session,
    topics: Vec<Topic>,
    policy: NavigationPolicy,
    service: &'a dyn JournalService,
    notifier: &'a dyn Notifier,
}

impl<'a> Wizard<'a> {
    /// Enter the wizard
    ///
    /// Without a credential this fails with `Unauthenticated` before touching
    /// the backend. Otherwise the topic directory is fetched; if that fails
    /// the built-in topic list is used instead.
    pub async fn mount(
        session: Option<Session>,
        service: &'a dyn JournalService,
        notifier: &'a dyn Notifier,
    ) -> Result<Self> {
        let Some(session) = session else {
            return Err(Error::Unauthenticated(
                "sign in before submitting a manuscript".to_string(),
            ));
        };

        let topics = match service.list_topics().await {
            Ok(topics) if !topics.is_empty() => topics,
            Ok(_) => {
                warn!("topic directory is empty, using built-in topics");
                fallback_topics()
            }
            Err(e) => {
                warn!(error = %e, "topic fetch failed, using built-in topics");
                notifier.on_error(&e).await;
                notifier
                    .on_message("Could not load research topics; showing the default list")
                    .await;
                fallback_topics()
            }
        };

        let wizard = Self {
            state: WizardState::new(),
            session,
            topics,
            policy: NavigationPolicy::default(),
            service,
            notifier,
        };
        notifier.on_step(wizard.step()).await;
        Ok(wizard)
    }

    /// Change the navigation policy
    #[must_use]
    pub const fn with_policy(mut self, policy: NavigationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current state
    pub const fn state(&self) -> &WizardState {
        &self.state
    }

    /// Current step
    pub const fn step(&self) -> Step {
        self.state.step()
    }

    /// Draft being assembled
    pub const fn draft(&self) -> &Draft {
        self.state.draft()
    }

    /// Topics a draft may pick from
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Active navigation policy
    pub const fn policy(&self) -> NavigationPolicy {
        self.policy
    }

    /// Whether the submit control is enabled
    ///
    /// Under the strict policy the whole draft must also pass the checks
    /// [`submit`](Self::submit) runs.
    pub fn can_submit(&self) -> bool {
        self.state.can_submit()
            && (self.policy == NavigationPolicy::Lenient
                || draft_issues(self.draft(), &self.topics).is_empty())
    }

    /// Apply a pure event without any checks
    pub fn dispatch(&mut self, event: Event) {
        debug!(?event, "wizard event");
        self.state = std::mem::take(&mut self.state).apply(event);
    }

    /// Advance one step, validating first under the strict policy
    pub async fn next(&mut self) -> Result<Step> {
        if self.policy == NavigationPolicy::Strict {
            if let Err(e) = check_step(self.step(), self.draft(), &self.topics) {
                self.notifier.on_error(&e).await;
                return Err(e);
            }
        }
        let before = self.step();
        self.dispatch(Event::Next);
        if self.step() != before {
            self.notifier.on_step(self.step()).await;
        }
        Ok(self.step())
    }

    /// Go back one step
    pub async fn previous(&mut self) -> Step {
        let before = self.step();
        self.dispatch(Event::Previous);
        if self.step() != before {
            self.notifier.on_step(self.step()).await;
        }
        self.step()
    }

    /// Append a blank author
    pub fn add_author(&mut self) {
        self.dispatch(Event::AddAuthor);
    }

    /// Edit one author field
    pub fn update_author(&mut self, index: usize, field: AuthorField, value: &str) {
        self.dispatch(Event::UpdateAuthorField {
            index,
            field,
            value: value.to_string(),
        });
    }

    /// Flip a declaration; returns whether it changed (only on the review step)
    pub fn toggle_declaration(&mut self, kind: DeclarationKind) -> bool {
        let before = self.draft().declarations.get(kind);
        self.dispatch(Event::ToggleDeclaration(kind));
        self.draft().declarations.get(kind) != before
    }

    /// Upload a batch of files for a slot and record them on the draft
    ///
    /// Shorthand for [`begin_upload`](Self::begin_upload), sending the
    /// request and [`finish_upload`](Self::finish_upload). The step does not
    /// change. On failure the draft is left as it was. Returns the number of
    /// files recorded.
    pub async fn upload(&mut self, slot: RequirementSlot, files: Vec<FileToUpload>) -> Result<usize> {
        let pending = self.begin_upload(slot, files).await?;
        let (ticket, result) = pending.send().await;
        self.finish_upload(ticket, result).await
    }

    /// Check a batch locally and issue a ticket for it
    ///
    /// The returned request borrows nothing from the wizard, so navigation
    /// and other uploads can go on while it is in flight. A later
    /// `begin_upload` for the same slot supersedes this one.
    pub async fn begin_upload(
        &mut self,
        slot: RequirementSlot,
        files: Vec<FileToUpload>,
    ) -> Result<PendingUpload<'a>> {
        if let Err(e) = check_upload_batch(&files) {
            self.notifier.on_error(&e).await;
            return Err(e);
        }

        let ticket = self.state.begin_upload(slot);
        self.notifier
            .on_upload(slot, UploadStatus::Started(files.len()))
            .await;

        Ok(PendingUpload {
            ticket,
            files,
            session: self.session.clone(),
            service: self.service,
        })
    }

    /// Record the result of a sent upload
    ///
    /// Returns 0 without touching the draft if the ticket was superseded or
    /// the draft was reset meanwhile.
    pub async fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<Vec<UploadedFile>>,
    ) -> Result<usize> {
        let slot = ticket.slot();
        match result {
            Ok(stored) => {
                let count = stored.len();
                if self.state.complete_upload(ticket, stored) {
                    info!(slot = %slot, count, "upload recorded");
                    self.notifier
                        .on_upload(slot, UploadStatus::Stored(count))
                        .await;
                    Ok(count)
                } else {
                    warn!(slot = %slot, "discarding superseded upload");
                    self.notifier.on_upload(slot, UploadStatus::Superseded).await;
                    Ok(0)
                }
            }
            Err(e) => {
                warn!(slot = %slot, error = %e, "upload failed");
                self.notifier
                    .on_upload(slot, UploadStatus::Failed(e.to_string()))
                    .await;
                self.notifier.on_error(&e).await;
                Err(e)
            }
        }
    }

    /// Submit the draft
    ///
    /// On success the wizard starts over with an empty draft. On failure the
    /// draft is untouched so the user can retry.
    pub async fn submit(&mut self) -> Result<SubmitReceipt> {
        if self.policy == NavigationPolicy::Strict {
            if let Err(e) = check_draft(self.draft(), &self.topics) {
                self.notifier.on_error(&e).await;
                return Err(e);
            }
        }

        let payload = match self.state.begin_submit() {
            Ok(payload) => payload,
            Err(e) => {
                self.notifier.on_error(&e).await;
                return Err(e);
            }
        };
        let key = self.state.idempotency_key().to_string();

        match self
            .service
            .create_submission(&self.session, &payload, &key)
            .await
        {
            Ok(receipt) => {
                self.state.finish_submit(true);
                info!(id = ?receipt.submission_id, "manuscript submitted");
                self.notifier.on_submitted(&receipt).await;
                self.notifier.on_step(self.step()).await;
                Ok(receipt)
            }
            Err(e) => {
                self.state.finish_submit(false);
                warn!(error = %e, "submit failed");
                self.notifier.on_error(&e).await;
                Err(e)
            }
        }
    }
}
