//! `PostgreSQL` store implementation for task persistence.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::recurrence::domain::{Recurrence, TemplateId};
use crate::task::{
    domain::{OwnerId, PersistedTaskData, Priority, ProjectId, Task, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the engine's adapters.
pub type EnginePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: EnginePgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: EnginePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn insert(&self, task: &Task) -> TaskStoreResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskStoreError::DuplicateTask(task_id)
                    }
                    _ => TaskStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskStoreResult<()> {
        let task_id = task.id();
        let row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&row)
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            if updated == 0 {
                return Err(TaskStoreError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, owner: OwnerId, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_by_project(
        &self,
        owner: OwnerId,
        project: ProjectId,
    ) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .filter(tasks::project_id.eq(project.into_inner()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_subtasks(&self, owner: OwnerId, parent: TaskId) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .filter(tasks::parent_task_id.eq(parent.into_inner()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_dependents(
        &self,
        owner: OwnerId,
        dependency: TaskId,
    ) -> TaskStoreResult<Vec<Task>> {
        let needle =
            serde_json::to_value(vec![dependency]).map_err(TaskStoreError::persistence)?;
        self.run_blocking(move |connection| {
            let query = diesel::sql_query(concat!(
                "SELECT id, owner_id, project_id, parent_task_id, template_id, name, ",
                "description, status, completed, completed_at, dependency_task_ids, ",
                "sub_task_completion_required, kanban_column, recurrence, priority, ",
                "category, due_date, due_time, sort_order, created_at, updated_at ",
                "FROM tasks WHERE owner_id = $1 AND dependency_task_ids @> $2 ",
                "ORDER BY created_at, id",
            ))
            .bind::<diesel::sql_types::Uuid, _>(owner.into_inner())
            .bind::<diesel::sql_types::Jsonb, _>(needle);

            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count_template_instances(
        &self,
        owner: OwnerId,
        template: TemplateId,
    ) -> TaskStoreResult<u64> {
        self.run_blocking(move |connection| {
            let count: i64 = tasks::table
                .filter(tasks::owner_id.eq(owner.into_inner()))
                .filter(tasks::template_id.eq(template.into_inner()))
                .count()
                .get_result(connection)
                .map_err(TaskStoreError::persistence)?;
            Ok(u64::try_from(count).unwrap_or_default())
        })
        .await
    }

    async fn delete(&self, owner: OwnerId, id: TaskId) -> TaskStoreResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::owner_id.eq(owner.into_inner())),
            )
            .execute(connection)
            .map_err(TaskStoreError::persistence)?;
            if deleted == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn to_new_row(task: &Task) -> TaskStoreResult<NewTaskRow> {
    let dependency_task_ids = serde_json::to_value(task.dependency_task_ids())
        .map_err(TaskStoreError::persistence)?;
    let recurrence =
        serde_json::to_value(task.recurrence()).map_err(TaskStoreError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        owner_id: task.owner_id().into_inner(),
        project_id: task.project_id().into_inner(),
        parent_task_id: task.parent_task_id().map(TaskId::into_inner),
        template_id: task.template_id().map(TemplateId::into_inner),
        name: task.name().to_owned(),
        description: task.description().map(ToOwned::to_owned),
        status: task.status().as_str().to_owned(),
        completed: task.completed(),
        completed_at: task.completed_at(),
        dependency_task_ids,
        sub_task_completion_required: task.sub_task_completion_required(),
        kanban_column: task.kanban_column().as_str().to_owned(),
        recurrence,
        priority: task.priority().as_str().to_owned(),
        category: task.category().map(ToOwned::to_owned),
        due_date: task.due_date(),
        due_time: task.due_time(),
        sort_order: task.sort_order(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskStoreError::persistence)?;
    // The derived columns are stored for query convenience but the
    // status remains authoritative on read.
    debug_assert!(
        row.completed == status.is_completed() && row.kanban_column == status.column().as_str(),
        "stored completion projection should match status"
    );
    let priority =
        Priority::try_from(row.priority.as_str()).map_err(TaskStoreError::persistence)?;
    let dependency_task_ids = serde_json::from_value::<Vec<TaskId>>(row.dependency_task_ids)
        .map_err(TaskStoreError::persistence)?;
    let recurrence = serde_json::from_value::<Recurrence>(row.recurrence)
        .map_err(TaskStoreError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        owner_id: OwnerId::from_uuid(row.owner_id),
        project_id: ProjectId::from_uuid(row.project_id),
        parent_task_id: row.parent_task_id.map(TaskId::from_uuid),
        template_id: row.template_id.map(TemplateId::from_uuid),
        name: row.name,
        description: row.description,
        status,
        completed_at: row.completed_at,
        dependency_task_ids,
        sub_task_completion_required: row.sub_task_completion_required,
        recurrence,
        priority,
        category: row.category,
        due_date: row.due_date,
        due_time: row.due_time,
        sort_order: row.sort_order,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Task::from_persisted(data))
}
