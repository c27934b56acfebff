//! `PostgreSQL` store implementation for recurring task templates.

use super::{
    models::{NewTemplateRow, TemplateRow},
    schema::recurring_task_templates,
};
use crate::recurrence::{
    domain::{
        PersistedTemplateData, RecurrencePattern, RecurringTaskTemplate, TemplateId,
    },
    ports::{TemplateStore, TemplateStoreError, TemplateStoreResult},
};
use crate::task::adapters::postgres::EnginePgPool;
use crate::task::domain::{OwnerId, Priority, ProjectId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed template store.
#[derive(Debug, Clone)]
pub struct PostgresTemplateStore {
    pool: EnginePgPool,
}

impl PostgresTemplateStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: EnginePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TemplateStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TemplateStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TemplateStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TemplateStoreError::persistence)?
    }
}

#[async_trait]
impl TemplateStore for PostgresTemplateStore {
    async fn insert(&self, template: &RecurringTaskTemplate) -> TemplateStoreResult<()> {
        let template_id = template.id();
        let new_row = to_new_row(template)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(recurring_task_templates::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TemplateStoreError::DuplicateTemplate(template_id)
                    }
                    _ => TemplateStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, template: &RecurringTaskTemplate) -> TemplateStoreResult<()> {
        let template_id = template.id();
        let row = to_new_row(template)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(
                recurring_task_templates::table
                    .filter(recurring_task_templates::id.eq(template_id.into_inner())),
            )
            .set(&row)
            .execute(connection)
            .map_err(TemplateStoreError::persistence)?;
            if updated == 0 {
                return Err(TemplateStoreError::NotFound(template_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        owner: OwnerId,
        id: TemplateId,
    ) -> TemplateStoreResult<Option<RecurringTaskTemplate>> {
        self.run_blocking(move |connection| {
            let row = recurring_task_templates::table
                .filter(recurring_task_templates::id.eq(id.into_inner()))
                .filter(recurring_task_templates::owner_id.eq(owner.into_inner()))
                .select(TemplateRow::as_select())
                .first::<TemplateRow>(connection)
                .optional()
                .map_err(TemplateStoreError::persistence)?;
            row.map(row_to_template).transpose()
        })
        .await
    }

    async fn list_active(&self, owner: OwnerId) -> TemplateStoreResult<Vec<RecurringTaskTemplate>> {
        self.run_blocking(move |connection| {
            let rows = recurring_task_templates::table
                .filter(recurring_task_templates::owner_id.eq(owner.into_inner()))
                .filter(recurring_task_templates::is_active.eq(true))
                .order((
                    recurring_task_templates::created_at.asc(),
                    recurring_task_templates::id.asc(),
                ))
                .select(TemplateRow::as_select())
                .load::<TemplateRow>(connection)
                .map_err(TemplateStoreError::persistence)?;
            rows.into_iter().map(row_to_template).collect()
        })
        .await
    }
}

fn to_new_row(template: &RecurringTaskTemplate) -> TemplateStoreResult<NewTemplateRow> {
    let pattern =
        serde_json::to_value(template.pattern()).map_err(TemplateStoreError::persistence)?;

    Ok(NewTemplateRow {
        id: template.id().into_inner(),
        owner_id: template.owner_id().into_inner(),
        project_id: template.project_id().into_inner(),
        name: template.name().to_owned(),
        description: template.description().map(ToOwned::to_owned),
        priority: template.priority().as_str().to_owned(),
        category: template.category().map(ToOwned::to_owned),
        due_time: template.due_time(),
        pattern,
        is_active: template.is_active(),
        last_generated_date: template.last_generated_date(),
        created_at: template.created_at(),
        updated_at: template.updated_at(),
    })
}

fn row_to_template(row: TemplateRow) -> TemplateStoreResult<RecurringTaskTemplate> {
    let priority =
        Priority::try_from(row.priority.as_str()).map_err(TemplateStoreError::persistence)?;
    let pattern = serde_json::from_value::<RecurrencePattern>(row.pattern)
        .map_err(TemplateStoreError::persistence)?;

    let data = PersistedTemplateData {
        id: TemplateId::from_uuid(row.id),
        owner_id: OwnerId::from_uuid(row.owner_id),
        project_id: ProjectId::from_uuid(row.project_id),
        name: row.name,
        description: row.description,
        priority,
        category: row.category,
        due_time: row.due_time,
        pattern,
        is_active: row.is_active,
        last_generated_date: row.last_generated_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(RecurringTaskTemplate::from_persisted(data))
}
