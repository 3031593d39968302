pub mod dates;
pub mod patch;

pub mod achievement;
pub mod auth;
pub mod contract;
pub mod education;
pub mod image;
pub mod job;
pub mod language;
pub mod product;
pub mod product_image;
pub mod profile;
pub mod skill;
pub mod target;

pub use dates::IsoDate;
pub use patch::Patch;

pub use achievement::{Achievement, CreateAchievementRequest, UpdateAchievementRequest};
pub use auth::{LoginRequest, RegisterRequest};
pub use contract::{Contract, CreateContractRequest, UpdateContractRequest};
pub use education::{CreateEducationRequest, Education, UpdateEducationRequest};
pub use image::{CreateImageRequest, Image, UpdateImageRequest};
pub use job::{CreateJobRequest, Job, UpdateJobRequest};
pub use language::{CreateLanguageRequest, Language, UpdateLanguageRequest};
pub use product::{CreateProductRequest, Product, UpdateProductRequest};
pub use product_image::{CreateProductImageRequest, UpdateProductImageRequest};
pub use profile::UpdateProfileRequest;
pub use skill::{CreateSkillRequest, Skill, UpdateSkillRequest};
pub use target::{CreateTargetRequest, Target, UpdateTargetRequest};
