use super::{UserCommandService, ensure_capability, password::validate_password};
use crate::{
    application::{
        dto::{Actor, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{NewUser, PasswordHash, Role, User, Username},
};

pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
    pub role: Option<Role>,
}

impl UserCommandService {
    /// The first account becomes the administrator; later ones need `users:create`.
    pub async fn register(
        &self,
        actor: Option<&Actor>,
        command: RegisterUserCommand,
    ) -> ApplicationResult<UserDto> {
        let username = Username::new(command.username)?;
        validate_password(&username, &command.password)?;
        let existing = self.user_repo.count().await?;
        let role = determine_role(existing, actor, command.role)?;

        if existing > 0 && self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }

        let user = self
            .create_and_insert_user(username, &command.password, role)
            .await?;
        tracing::info!(user_id = user.id.0, role = %user.role, "user registered");
        Ok(user.into())
    }

    async fn create_and_insert_user(
        &self,
        username: Username,
        password: &str,
        role: Role,
    ) -> ApplicationResult<User> {
        let hashed = self.password_hasher.hash(password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let new_user = NewUser::active(username, password_hash, role, self.clock.now());
        Ok(self.user_repo.insert(new_user).await?)
    }
}

fn determine_role(existing: u64, actor: Option<&Actor>, role: Option<Role>) -> ApplicationResult<Role> {
    if existing == 0 {
        return Ok(Role::Admin);
    }
    let requester =
        actor.ok_or_else(|| ApplicationError::forbidden("administrative privileges are required"))?;
    ensure_capability(requester, "users", "create")?;
    Ok(role.unwrap_or_default())
}
