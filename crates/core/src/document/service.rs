//! Document orchestration.
//!
//! Every public operation runs inside one unit of work: it is committed
//! when the operation succeeds and rolled back on the first error.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ledgerline_shared::config::DocumentConfig;
use ledgerline_shared::types::{DocumentId, LanguageId};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::{CalculationResult, LineItemCalculator, RawLineItem};
use crate::clock::{Clock, SystemClock};
use crate::code::CodeGenerator;
use crate::document::effects::LedgerEffectCoordinator;
use crate::document::error::{DocumentError, EffectKind};
use crate::document::ports::{
    DetailRepository, DocumentRepository, ItemRepository, JournalService, UnitOfWork,
    UnitOfWorkFactory,
};
use crate::document::projection::{DetailProjection, DocumentDetail};
use crate::document::types::{
    CodePrefixes, CreateDocumentInput, Document, DocumentKind, UpdateDocumentInput,
};
use crate::journal::{JournalLine, validate_lines};
use crate::lifecycle::{DocumentStatus, EffectAction, LifecycleService};
use crate::tax::{ResolvedRates, TaxResolver};

/// Creates, updates, confirms, cancels and deletes documents.
pub struct DocumentService<F: UnitOfWorkFactory> {
    store: F,
    codes: CodeGenerator,
    prefixes: CodePrefixes,
    clock: Arc<dyn Clock>,
}

impl<F: UnitOfWorkFactory> DocumentService<F> {
    /// Creates a service with default prefixes, 100 code attempts and the system clock.
    pub fn new(store: F) -> Self {
        Self {
            store,
            codes: CodeGenerator::default(),
            prefixes: CodePrefixes::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Creates a service configured from `config`.
    pub fn from_config(store: F, config: &DocumentConfig) -> Self {
        Self::new(store)
            .with_code_generator(CodeGenerator::new(config.code_max_attempts))
            .with_prefixes(CodePrefixes::from(&config.prefixes))
    }

    /// Replaces the code generator.
    #[must_use]
    pub fn with_code_generator(mut self, codes: CodeGenerator) -> Self {
        self.codes = codes;
        self
    }

    /// Replaces the code prefixes.
    #[must_use]
    pub fn with_prefixes(mut self, prefixes: CodePrefixes) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &F {
        &self.store
    }

    /// Creates a document as draft or confirmed.
    ///
    /// Confirmed documents get their ledger effects applied in the same
    /// unit of work.
    pub async fn create(&self, input: CreateDocumentInput) -> Result<Document, DocumentError> {
        let mut work = self.store.begin().await?;
        let result = self.create_in(&mut work, input).await;
        let document = Self::finish(work, result).await?;

        info!(
            document_id = %document.id,
            code = %document.code,
            kind = %document.kind,
            status = %document.status,
            grand_total = %document.grand_total,
            "document created"
        );
        Ok(document)
    }

    /// Updates a document.
    ///
    /// Drafts get their header, items and journal replaced and may move to
    /// confirmed. Confirmed documents only accept cancellation.
    pub async fn update(
        &self,
        id: DocumentId,
        input: UpdateDocumentInput,
    ) -> Result<Document, DocumentError> {
        let mut work = self.store.begin().await?;
        let result = self.update_in(&mut work, id, input).await;
        let document = Self::finish(work, result).await?;

        info!(document_id = %id, status = %document.status, "document updated");
        Ok(document)
    }

    /// Confirms a draft without changing its content.
    pub async fn confirm(&self, id: DocumentId) -> Result<Document, DocumentError> {
        let mut work = self.store.begin().await?;
        let result = self.confirm_in(&mut work, id).await;
        let document = Self::finish(work, result).await?;

        info!(document_id = %id, code = %document.code, "document confirmed");
        Ok(document)
    }

    /// Cancels a confirmed document, reversing its effects.
    pub async fn cancel(&self, id: DocumentId) -> Result<Document, DocumentError> {
        let mut work = self.store.begin().await?;
        let result = self.cancel_in(&mut work, id).await;
        let document = Self::finish(work, result).await?;

        info!(document_id = %id, code = %document.code, "document cancelled");
        Ok(document)
    }

    /// Deletes a document in any status, discarding its effects.
    pub async fn delete(&self, id: DocumentId) -> Result<(), DocumentError> {
        let mut work = self.store.begin().await?;
        let result = self.delete_in(&mut work, id).await;
        let status = Self::finish(work, result).await?;

        info!(document_id = %id, %status, "document deleted");
        Ok(())
    }

    /// Loads a document with its items.
    pub async fn find(&self, id: DocumentId) -> Result<Document, DocumentError> {
        let mut work = self.store.begin().await?;
        let result = work
            .find_document(id)
            .await
            .map_err(DocumentError::from)
            .and_then(|found| found.ok_or(DocumentError::NotFound(id)));
        Self::finish(work, result).await
    }

    /// Builds the detail view of a document in `language_id`.
    pub async fn detail(
        &self,
        id: DocumentId,
        language_id: LanguageId,
    ) -> Result<DocumentDetail, DocumentError> {
        let mut work = self.store.begin().await?;
        let result = work
            .load_detail_source(id)
            .await
            .map_err(DocumentError::from)
            .and_then(|found| found.ok_or(DocumentError::NotFound(id)));
        let source = Self::finish(work, result).await?;

        Ok(DetailProjection::project(source, language_id))
    }

    async fn finish<T>(
        work: F::Work,
        result: Result<T, DocumentError>,
    ) -> Result<T, DocumentError> {
        match result {
            Ok(value) => {
                work.commit().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback) = work.rollback().await {
                    warn!(error = %rollback, "rollback failed");
                }
                debug!(code = error.error_code(), %error, "unit of work rolled back");
                Err(error)
            }
        }
    }

    async fn create_in(
        &self,
        work: &mut F::Work,
        input: CreateDocumentInput,
    ) -> Result<Document, DocumentError> {
        let id = DocumentId::new();
        let transition = LifecycleService::create(input.status)
            .map_err(|e| DocumentError::from_lifecycle(e, id))?;

        if let Some(lines) = &input.journal_lines {
            validate_lines(lines)?;
        }

        let calculation =
            Self::calculate(work, &input.items, input.kind.policy().discount_applies).await?;
        let now = self.clock.now();

        let code = match input.code.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(code) => {
                if work.code_exists(code).await? {
                    return Err(DocumentError::DuplicateCode(code.to_string()));
                }
                code.to_string()
            }
            None => self.generate_code(work, input.kind, now).await?,
        };

        let mut document = Document {
            id,
            code,
            kind: input.kind,
            counterparty_id: input.counterparty_id,
            document_date: input.document_date,
            status: input.status,
            total_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            grand_total: Decimal::ZERO,
            note: input.note,
            line_items: Vec::new(),
            created_by: input.created_by,
            created_at: now,
            updated_at: now,
        };
        document.apply_calculation(calculation);

        work.insert_document(&document).await?;
        work.insert_items(id, &document.line_items).await?;

        if let Some(lines) = &input.journal_lines {
            Self::store_journal(work, &document, lines).await?;
        }

        if transition.effects == EffectAction::Apply {
            LedgerEffectCoordinator::apply_effects(work, &document).await?;
        }

        Ok(document)
    }

    async fn update_in(
        &self,
        work: &mut F::Work,
        id: DocumentId,
        input: UpdateDocumentInput,
    ) -> Result<Document, DocumentError> {
        let current = Self::lock(work, id).await?;
        let transition = LifecycleService::update(current.status, input.status)
            .map_err(|e| DocumentError::from_lifecycle(e, id))?;

        if !transition.replaces_content() {
            return self.reverse_and_cancel(work, current).await;
        }

        if let Some(lines) = &input.journal_lines {
            validate_lines(lines)?;
        }

        let calculation =
            Self::calculate(work, &input.items, current.policy().discount_applies).await?;

        let mut document = Document {
            counterparty_id: input.counterparty_id,
            document_date: input.document_date,
            status: input.status,
            note: input.note,
            updated_at: self.clock.now(),
            ..current
        };
        document.apply_calculation(calculation);

        work.update_document(&document).await?;
        work.delete_items(id).await?;
        work.insert_items(id, &document.line_items).await?;

        let reference = document.reference();
        match &input.journal_lines {
            Some(lines) => {
                work.delete_journal(&reference)
                    .await
                    .map_err(|e| DocumentError::effect(EffectKind::Journal, e))?;
                Self::store_journal(work, &document, lines).await?;
            }
            None => {
                work.update_journal_date(&reference, document.document_date)
                    .await
                    .map_err(|e| DocumentError::effect(EffectKind::Journal, e))?;
            }
        }

        if transition.effects == EffectAction::Apply {
            let reloaded = work
                .find_document(id)
                .await?
                .ok_or(DocumentError::NotFound(id))?;
            LedgerEffectCoordinator::apply_effects(work, &reloaded).await?;
            return Ok(reloaded);
        }

        Ok(document)
    }

    async fn confirm_in(
        &self,
        work: &mut F::Work,
        id: DocumentId,
    ) -> Result<Document, DocumentError> {
        let mut document = Self::lock(work, id).await?;
        LifecycleService::confirm(document.status)
            .map_err(|e| DocumentError::from_lifecycle(e, id))?;

        document.status = DocumentStatus::Confirmed;
        document.updated_at = self.clock.now();
        work.update_document(&document).await?;

        LedgerEffectCoordinator::apply_effects(work, &document).await?;
        Ok(document)
    }

    async fn cancel_in(
        &self,
        work: &mut F::Work,
        id: DocumentId,
    ) -> Result<Document, DocumentError> {
        let document = Self::lock(work, id).await?;
        LifecycleService::cancel(document.status)
            .map_err(|e| DocumentError::from_lifecycle(e, id))?;

        self.reverse_and_cancel(work, document).await
    }

    async fn delete_in(
        &self,
        work: &mut F::Work,
        id: DocumentId,
    ) -> Result<DocumentStatus, DocumentError> {
        let document = Self::lock(work, id).await?;
        let transition = LifecycleService::delete(document.status);

        LedgerEffectCoordinator::discard_effects(
            work,
            &document,
            transition.effects == EffectAction::Reverse,
        )
        .await?;

        work.delete_items(id).await?;
        work.delete_document(id).await?;
        Ok(document.status)
    }

    async fn reverse_and_cancel(
        &self,
        work: &mut F::Work,
        mut document: Document,
    ) -> Result<Document, DocumentError> {
        LedgerEffectCoordinator::reverse_effects(work, &document).await?;

        document.status = DocumentStatus::Cancelled;
        document.updated_at = self.clock.now();
        work.update_document(&document).await?;
        Ok(document)
    }

    async fn lock(work: &mut F::Work, id: DocumentId) -> Result<Document, DocumentError> {
        work.lock_document(id)
            .await?
            .ok_or(DocumentError::NotFound(id))
    }

    async fn store_journal(
        work: &mut F::Work,
        document: &Document,
        lines: &[JournalLine],
    ) -> Result<(), DocumentError> {
        if lines.is_empty() {
            return Ok(());
        }
        work.create_journal(&document.reference(), lines, document.document_date)
            .await
            .map_err(|e| DocumentError::effect(EffectKind::Journal, e))
    }

    /// Resolves tax rates and computes line items. Unknown tax IDs count as 0%.
    async fn calculate(
        work: &mut F::Work,
        items: &[RawLineItem],
        discount_applies: bool,
    ) -> Result<CalculationResult, DocumentError> {
        let mut rates = ResolvedRates::default();
        let mut seen = HashSet::new();

        for tax_id in items.iter().filter_map(|item| item.tax_id) {
            if seen.insert(tax_id) {
                let tax = work.find_tax(tax_id).await?;
                rates.record(tax_id, tax.as_ref());
            }
        }

        for tax_id in rates.unresolved() {
            warn!(%tax_id, "tax not found, using 0%");
        }

        LineItemCalculator::compute(items, discount_applies, |id| rates.rate(id))
            .map_err(DocumentError::from)
    }

    async fn generate_code(
        &self,
        work: &mut F::Work,
        kind: DocumentKind,
        at: DateTime<Utc>,
    ) -> Result<String, DocumentError> {
        let prefix = self.prefixes.for_kind(kind);

        for candidate in self.codes.candidates(prefix, at) {
            if !work.code_exists(&candidate).await? {
                return Ok(candidate);
            }
            debug!(code = %candidate, "code taken, trying next");
        }

        Err(self.codes.exhausted(prefix).into())
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
