//! Application state machine.
//!
//! Every status change is a compare-and-swap on the previous status, written in the same
//! transaction as the notification it produces. Step completions are guarded on their flag so
//! repeated requests never bump `last_updated` or enqueue twice.

use std::collections::{HashMap, HashSet};

use entity::sea_orm_active_enums::{
    ApplicationLocation, ApplicationStatus, Interest, Language, NotificationKind, Permission,
};
use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::{
    model::{
        application::{
            ApplicationDto, ApplicationQuestionsDto, GetApplicationsDto,
            PutApplicationQuestionsDto, PutApplicationStatusDto,
        },
        user::UserDto,
    },
    server::{
        client::seat::SeatClient,
        data::{
            application::{
                answer::AnswerRepository,
                application::{ApplicationFilter, ApplicationRepository, QuestionAnswers},
            },
            notification::NotificationRepository,
        },
        error::{application::ApplicationError, auth::AuthError, Error},
        service::user::{has_permission, UserService},
        util::{
            eve::is_autumn_corporation,
            time::{is_older_than, now, REJECTION_COOLDOWN},
        },
    },
};

/// Maps the partial unique index on active applications to a conflict.
///
/// Two concurrent requests can both miss the active application check; the second insert
/// then violates the index instead of creating a duplicate.
fn active_application_conflict(err: DbErr) -> Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ApplicationError::ActiveApplicationExists(ApplicationStatus::Pending).into()
        }
        _ => err.into(),
    }
}

/// Longest accepted free-text answer, in characters.
pub const MAX_ANSWER_LENGTH: usize = 250;

const WHY_AUTUMN_LABEL: &str = "What made you choose Autumn?";
const END_GOALS_LABEL: &str = "What are your end goals in EVE Online?";

/// Result of a mutation which may have enqueued a notification.
#[derive(Debug)]
pub struct ApplicationUpdate {
    pub application: ApplicationDto,
    /// True when a notification row was written and a delivery pass should be triggered
    pub notified: bool,
}

/// Refuses applicants whose main character is already in one of the Autumn corporations.
pub fn ensure_not_member(user: &UserDto) -> Result<(), ApplicationError> {
    if is_autumn_corporation(user.corporation_id) {
        return Err(ApplicationError::AlreadyMember);
    }

    Ok(())
}

pub struct ApplicationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApplicationService<'a> {
    /// Creates a new instance of [`ApplicationService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// The applicant's most recently updated application.
    ///
    /// # Returns
    /// - `Ok(ApplicationDto)` - Latest application of the user
    /// - `Err(ApplicationError::NoApplication)` - User has no application or it has expired
    pub async fn get_current(&self, user_id: i32) -> Result<ApplicationDto, Error> {
        let application = ApplicationRepository::new(self.db)
            .get_latest_for_user(user_id)
            .await?
            .filter(|application| application.status != ApplicationStatus::Expired)
            .ok_or(ApplicationError::NoApplication)?;

        self.to_dto(application).await
    }

    pub async fn get(&self, application_id: i32) -> Result<ApplicationDto, Error> {
        let application = ApplicationRepository::new(self.db)
            .get(application_id)
            .await?
            .ok_or(ApplicationError::NotFound(application_id))?;

        self.to_dto(application).await
    }

    /// Pages through applications for the admin listing.
    ///
    /// `character` is a case-insensitive substring of any owned character's name and is
    /// combined with `filter.user_ids` when both are present.
    pub async fn list(
        &self,
        mut filter: ApplicationFilter,
        character: Option<&str>,
        limit: u64,
        page: u64,
    ) -> Result<GetApplicationsDto, Error> {
        if let Some(character) = character.filter(|name| !name.is_empty()) {
            let matching = UserService::new(self.db)
                .find_user_ids_by_character_name(character)
                .await?;

            filter.user_ids = Some(match filter.user_ids.take() {
                Some(user_ids) => user_ids
                    .into_iter()
                    .filter(|id| matching.contains(id))
                    .collect(),
                None => matching,
            });
        }

        let (applications, total) = ApplicationRepository::new(self.db)
            .list(&filter, limit, page)
            .await?;

        Ok(GetApplicationsDto {
            applications: self.to_dtos(applications).await?,
            total,
        })
    }

    /// Starts an application or changes the location of the pending one.
    ///
    /// Creation re-checks for an active application inside the transaction and enqueues a
    /// NewApplication notification with it.
    pub async fn set_location(
        &self,
        user: &UserDto,
        location: ApplicationLocation,
    ) -> Result<ApplicationUpdate, Error> {
        ensure_not_member(user)?;

        let txn = self.db.begin().await?;
        let application_repo = ApplicationRepository::new(&txn);

        if let Some(rejected) = application_repo
            .get_latest_for_user_with_status(user.id, ApplicationStatus::Rejected)
            .await?
        {
            if !is_older_than(rejected.last_updated, REJECTION_COOLDOWN, now()) {
                return Err(ApplicationError::RejectionCooldown.into());
            }
        }

        let (application_id, notified) =
            match application_repo.get_active_for_user(user.id).await? {
                Some(active) if active.status == ApplicationStatus::Pending => {
                    if application_repo
                        .update_location(active.id, location)
                        .await?
                        == 0
                    {
                        return Err(ApplicationError::StatusChanged(active.id).into());
                    }

                    (active.id, false)
                }
                Some(active) => {
                    return Err(ApplicationError::ActiveApplicationExists(active.status).into())
                }
                None => {
                    let application = application_repo
                        .create(user.id, location)
                        .await
                        .map_err(active_application_conflict)?;
                    NotificationRepository::new(&txn)
                        .enqueue(NotificationKind::NewApplication, application.id, None)
                        .await?;

                    (application.id, true)
                }
            };

        txn.commit().await?;

        Ok(ApplicationUpdate {
            application: self.get(application_id).await?,
            notified,
        })
    }

    /// Completes the SeAT step once the applicant's main character is linked to a SeAT user.
    ///
    /// An unlinked character leaves the flag unset without failing.
    pub async fn check_seat_status(
        &self,
        user: &UserDto,
        seat_client: &SeatClient,
    ) -> Result<ApplicationDto, Error> {
        ensure_not_member(user)?;

        let application_repo = ApplicationRepository::new(self.db);
        let application = self.get_pending(user.id).await?;

        if !application.seat_completed
            && seat_client
                .get_character_user_id(user.character_id)
                .await?
                .is_some()
        {
            application_repo.complete_seat_step(application.id).await?;
        }

        self.get(application.id).await
    }

    pub async fn complete_discord(&self, user: &UserDto) -> Result<ApplicationDto, Error> {
        ensure_not_member(user)?;

        let application = self.get_pending(user.id).await?;

        ApplicationRepository::new(self.db)
            .complete_discord_step(application.id)
            .await?;

        self.get(application.id).await
    }

    /// Saves the questionnaire of the pending application.
    ///
    /// `last_updated` only moves when an answer actually changed. Once every answer is filled
    /// the questions step completes and a single ReadyForReview notification is enqueued.
    pub async fn set_questions(
        &self,
        user: &UserDto,
        questions: PutApplicationQuestionsDto,
    ) -> Result<ApplicationUpdate, Error> {
        ensure_not_member(user)?;

        if questions.why_autumn.chars().count() > MAX_ANSWER_LENGTH {
            return Err(ApplicationError::AnswerTooLong(WHY_AUTUMN_LABEL).into());
        }
        if questions.end_goals.chars().count() > MAX_ANSWER_LENGTH {
            return Err(ApplicationError::AnswerTooLong(END_GOALS_LABEL).into());
        }

        let languages: HashSet<Language> = questions.languages.into_iter().collect();
        let interests: HashSet<Interest> = questions.interests.into_iter().collect();
        let answers = QuestionAnswers {
            referrer: questions.referrer,
            region: questions.region,
            end_goals: questions.end_goals,
            why_autumn: questions.why_autumn,
        };

        let txn = self.db.begin().await?;
        let application_repo = ApplicationRepository::new(&txn);
        let answer_repo = AnswerRepository::new(&txn);

        let application = application_repo
            .get_latest_for_user_with_status(user.id, ApplicationStatus::Pending)
            .await?
            .ok_or(ApplicationError::NoPendingApplication)?;

        let stored = QuestionAnswers {
            referrer: application.referrer,
            region: application.region,
            end_goals: application.end_goals.clone(),
            why_autumn: application.why_autumn.clone(),
        };

        let languages_changed = answer_repo
            .set_languages(application.id, &languages)
            .await?;
        let interests_changed = answer_repo
            .set_interests(application.id, &interests)
            .await?;

        let ready = !languages.is_empty()
            && !interests.is_empty()
            && answers.referrer.is_some()
            && answers.region.is_some()
            && !answers.end_goals.is_empty()
            && !answers.why_autumn.is_empty();

        if stored != answers {
            if application_repo.update_answers(application.id, answers).await? == 0 {
                return Err(ApplicationError::StatusChanged(application.id).into());
            }
        } else if languages_changed || interests_changed {
            application_repo.touch(application.id).await?;
        }

        let mut notified = false;
        if ready
            && !application.questions_completed
            && application_repo
                .complete_questions_step(application.id)
                .await?
                == 1
        {
            NotificationRepository::new(&txn)
                .enqueue(NotificationKind::ReadyForReview, application.id, None)
                .await?;
            notified = true;
        }

        txn.commit().await?;

        Ok(ApplicationUpdate {
            application: self.get(application.id).await?,
            notified,
        })
    }

    /// Applies an administrative decision.
    ///
    /// `reviewer` must carry resolved permissions. Accepted and Rejected enqueue their
    /// notification in the same transaction as the status change.
    pub async fn set_status(
        &self,
        application_id: i32,
        reviewer: &UserDto,
        request: PutApplicationStatusDto,
    ) -> Result<ApplicationUpdate, Error> {
        let (required, notification) = match request.status {
            ApplicationStatus::Accepted => {
                (Permission::AcceptApplication, Some(NotificationKind::Accepted))
            }
            ApplicationStatus::Rejected => {
                (Permission::RejectApplication, Some(NotificationKind::Rejected))
            }
            ApplicationStatus::Cancelled => (Permission::RejectApplication, None),
            status => return Err(ApplicationError::InvalidStatus(status).into()),
        };

        if !has_permission(&reviewer.permissions, required) {
            return Err(AuthError::MissingPermission {
                user_id: reviewer.id,
                permission: required,
            }
            .into());
        }

        let rejection_reason = if request.status == ApplicationStatus::Rejected {
            let reason = request
                .rejection_reason
                .as_deref()
                .map(str::trim)
                .unwrap_or_default();
            if reason.is_empty() {
                return Err(ApplicationError::MissingRejectionReason.into());
            }

            reason.to_string()
        } else {
            String::new()
        };

        let txn = self.db.begin().await?;
        let application_repo = ApplicationRepository::new(&txn);

        let application = application_repo
            .get(application_id)
            .await?
            .ok_or(ApplicationError::NotFound(application_id))?;

        if application.status.is_terminal() {
            return Err(ApplicationError::TerminalStatus(application.status).into());
        }
        if application.status == request.status {
            return Err(ApplicationError::AlreadyInStatus(application.status).into());
        }

        let rows = application_repo
            .update_status(
                application_id,
                application.status,
                request.status,
                Some(reviewer.id),
                rejection_reason,
            )
            .await?;
        if rows == 0 {
            return Err(ApplicationError::StatusChanged(application_id).into());
        }

        if let Some(kind) = notification {
            NotificationRepository::new(&txn)
                .enqueue(kind, application_id, Some(reviewer.id))
                .await?;
        }

        txn.commit().await?;

        Ok(ApplicationUpdate {
            application: self.get(application_id).await?,
            notified: notification.is_some(),
        })
    }

    /// Moves an active application to Expired with an Expired notification.
    ///
    /// # Returns
    /// `false` if the application left `previous` before the write
    pub async fn expire(&self, application_id: i32, previous: ApplicationStatus) -> Result<bool, Error> {
        self.transition(
            application_id,
            previous,
            ApplicationStatus::Expired,
            NotificationKind::Expired,
        )
        .await
    }

    /// Moves an Accepted application to Joined with a Joined notification.
    ///
    /// # Returns
    /// `false` if the application was no longer Accepted
    pub async fn mark_joined(&self, application_id: i32) -> Result<bool, Error> {
        self.transition(
            application_id,
            ApplicationStatus::Accepted,
            ApplicationStatus::Joined,
            NotificationKind::Joined,
        )
        .await
    }

    async fn transition(
        &self,
        application_id: i32,
        previous: ApplicationStatus,
        next: ApplicationStatus,
        kind: NotificationKind,
    ) -> Result<bool, Error> {
        let txn = self.db.begin().await?;

        let rows = ApplicationRepository::new(&txn)
            .update_status(application_id, previous, next, None, String::new())
            .await?;
        if rows == 0 {
            txn.rollback().await?;

            return Ok(false);
        }

        NotificationRepository::new(&txn)
            .enqueue(kind, application_id, None)
            .await?;

        txn.commit().await?;

        Ok(true)
    }

    async fn get_pending(&self, user_id: i32) -> Result<entity::application::Model, Error> {
        Ok(ApplicationRepository::new(self.db)
            .get_latest_for_user_with_status(user_id, ApplicationStatus::Pending)
            .await?
            .ok_or(ApplicationError::NoPendingApplication)?)
    }

    async fn to_dto(&self, application: entity::application::Model) -> Result<ApplicationDto, Error> {
        let id = application.id;

        self.to_dtos(vec![application])
            .await?
            .pop()
            .ok_or_else(|| Error::InternalError(format!("Failed to build application ID {}", id)))
    }

    /// Builds DTOs with applicant, reviewer and questionnaire, keeping the input order.
    pub async fn to_dtos(
        &self,
        applications: Vec<entity::application::Model>,
    ) -> Result<Vec<ApplicationDto>, Error> {
        let application_ids: Vec<i32> = applications.iter().map(|a| a.id).collect();

        let mut user_ids: Vec<i32> = applications
            .iter()
            .flat_map(|a| std::iter::once(a.user_id).chain(a.reviewer_user_id))
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let users = UserService::new(self.db).get_users(&user_ids).await?;

        let answer_repo = AnswerRepository::new(self.db);
        let mut languages: HashMap<i32, Vec<Language>> = HashMap::new();
        for row in answer_repo.get_languages(&application_ids).await? {
            languages
                .entry(row.application_id)
                .or_default()
                .push(row.language);
        }
        let mut interests: HashMap<i32, Vec<Interest>> = HashMap::new();
        for row in answer_repo.get_interests(&application_ids).await? {
            interests
                .entry(row.application_id)
                .or_default()
                .push(row.interest);
        }

        let find_user = |user_id: i32| {
            users.get(&user_id).cloned().ok_or_else(|| {
                Error::InternalError(format!(
                    "User ID {} referenced by an application does not exist",
                    user_id
                ))
            })
        };

        applications
            .into_iter()
            .map(|application| {
                let reviewer = match application.reviewer_user_id {
                    Some(reviewer_id) => Some(find_user(reviewer_id)?),
                    None => None,
                };

                Ok(ApplicationDto {
                    id: application.id,
                    user: find_user(application.user_id)?,
                    reviewer,
                    status: application.status,
                    rejection_reason: application.rejection_reason,
                    location: application.location,
                    seat_completed: application.seat_completed,
                    discord_completed: application.discord_completed,
                    questions: ApplicationQuestionsDto {
                        referrer: application.referrer,
                        region: application.region,
                        languages: languages.remove(&application.id).unwrap_or_default(),
                        interests: interests.remove(&application.id).unwrap_or_default(),
                        end_goals: application.end_goals,
                        why_autumn: application.why_autumn,
                    },
                    last_updated: application.last_updated,
                })
            })
            .collect()
    }
}
