//! 用户资料服务

use std::sync::Arc;

use tracing::info;
use xplor_common::{RoleId, Timestamps, UserId, prefixed_id};
use xplor_errors::AppResult;

use crate::application::dto::{
    CreateUserRequest, KycRequest, PersonaRequest, UpdateUserRequest, UpdateUserRoleRequest,
    UserResponse,
};
use crate::domain::entities::{Journey, Kyc, User};
use crate::domain::repositories::{RoleRepository, UserRepository};
use crate::domain::value_objects::{HashedMpin, Mpin, PhoneNumber};
use crate::error::IdentityError;

pub struct UserService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { users, roles }
    }

    async fn load(&self, id: &UserId) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| IdentityError::UserNotFound.into())
    }

    /// 以已验证手机号创建用户
    pub async fn create_from_phone(
        &self,
        phone_number: &str,
        country_code: Option<String>,
    ) -> AppResult<User> {
        let phone = PhoneNumber::parse(phone_number)?;
        let user = User::from_verified_phone(phone.into_inner(), country_code);
        self.users.save(&user).await?;
        Ok(user)
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        let phone = PhoneNumber::parse(&request.phone_number)?;
        if self.users.find_by_phone(phone.as_str()).await?.is_some() {
            return Err(IdentityError::PhoneNumberTaken.into());
        }

        let mut user = User::new(phone.into_inner());
        user.verified = request.verified.unwrap_or(false);
        user.wallet = request.wallet;
        if let Some(role) = request.role {
            user.role = Some(RoleId::from_string(role));
        }
        if let Some(raw) = request.m_pin.as_deref() {
            user.mpin = Some(HashedMpin::from_plain(&Mpin::parse(raw)?)?);
        }
        if let Some(kyc) = request.kyc {
            user.set_kyc(build_kyc(kyc));
        }
        if let Some(kyc_status) = request.kyc_status {
            user.kyc_status = kyc_status;
        }

        self.users.save(&user).await?;
        info!(user_id = %user.id, "User created");
        Ok(user.into())
    }

    pub async fn find_all(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.users.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// 详情中角色展开为完整文档
    pub async fn find_one(&self, id: &UserId) -> AppResult<UserResponse> {
        let user = self.load(id).await?;
        let role = match &user.role {
            Some(role_id) => self.roles.find_by_id(role_id).await?,
            None => None,
        };
        Ok(UserResponse::with_role(user, role))
    }

    pub async fn find_by_phone(&self, phone_number: &str) -> AppResult<Option<User>> {
        let phone = PhoneNumber::parse(phone_number)?;
        self.users.find_by_phone(phone.as_str()).await
    }

    pub async fn update(&self, id: &UserId, request: UpdateUserRequest) -> AppResult<UserResponse> {
        let mut user = self.load(id).await?;

        if let Some(phone_number) = request.phone_number {
            user.phone_number = PhoneNumber::parse(&phone_number)?.into_inner();
        }
        if let Some(verified) = request.verified {
            user.verified = verified;
        }
        if let Some(kyc_status) = request.kyc_status {
            user.kyc_status = kyc_status;
        }
        if let Some(role) = request.role {
            user.role = Some(RoleId::from_string(role));
        }
        if let Some(wallet) = request.wallet {
            user.wallet = Some(wallet);
        }
        if let Some(language) = request.language_preference {
            user.language_preference = Some(language);
        }
        if let Some(domains) = request.domains {
            user.domains = domains;
        }
        if let Some(categories) = request.categories {
            user.categories = categories;
        }
        if let Some(country_code) = request.country_code {
            user.country_code = Some(country_code);
        }
        user.timestamps.touch();

        self.users.update(&user).await?;
        Ok(user.into())
    }

    pub async fn remove(&self, id: &UserId) -> AppResult<UserResponse> {
        let user = self.load(id).await?;
        self.users.delete(id).await?;
        info!(user_id = %id, "User removed");
        Ok(user.into())
    }

    pub async fn update_persona(
        &self,
        id: &UserId,
        request: PersonaRequest,
    ) -> AppResult<UserResponse> {
        let mut user = self.load(id).await?;
        if !request.interest.is_empty() {
            user.add_interests(request.interest.into_iter().map(|a| a.name));
            self.users.update(&user).await?;
        }
        Ok(user.into())
    }

    pub async fn update_kyc(&self, id: &UserId, request: KycRequest) -> AppResult<UserResponse> {
        let mut user = self.load(id).await?;
        user.set_kyc(build_kyc(request));
        self.users.update(&user).await?;
        info!(user_id = %id, "KYC updated");
        Ok(user.into())
    }

    pub async fn journey(&self, id: &UserId) -> AppResult<Journey> {
        Ok(self.load(id).await?.journey())
    }

    pub async fn update_role(
        &self,
        id: &UserId,
        request: UpdateUserRoleRequest,
    ) -> AppResult<UserResponse> {
        let role_id = RoleId::from_string(request.role_id);
        let role = self
            .roles
            .find_by_id(&role_id)
            .await?
            .ok_or(IdentityError::InvalidRole)?;

        let mut user = self.load(id).await?;
        user.set_role(role_id);
        self.users.update(&user).await?;
        Ok(UserResponse::with_role(user, Some(role)))
    }
}

fn build_kyc(request: KycRequest) -> Kyc {
    Kyc {
        id: prefixed_id("kyc"),
        last_name: request.last_name,
        first_name: request.first_name,
        address: request.address,
        email: request.email,
        gender: request.gender,
        dob: request.dob,
        provider: request.provider,
        wallet_id: request.wallet_id,
        timestamps: Timestamps::now(),
    }
}
