use pagewright_core::{AppError, AppResult, EntityId};
use uuid::Uuid;

pub const USAGE: &str = "usage: pagewright-console <command> [args]

commands:
  user-by-email <email>
  user-by-reset-token <token>
  current-user
  request-reset <email>
  complete-reset <token>
  validate-url <segment> [webpage-id]
  publish <webpage-id>
  unpublish <webpage-id>
  sort-pages [parent-id]
  sort-widgets <webpage-id> <layout-area-id>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    UserByEmail(String),
    UserByResetToken(Uuid),
    CurrentUser,
    RequestReset(String),
    CompleteReset(Uuid),
    ValidateUrl {
        url_segment: String,
        webpage_id: Option<EntityId>,
    },
    Publish(EntityId),
    Unpublish(EntityId),
    SortPages(Option<EntityId>),
    SortWidgets {
        webpage_id: EntityId,
        layout_area_id: EntityId,
    },
}

impl Command {
    pub fn parse<I>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let name = args.next().ok_or_else(usage_error)?;
        let first = args.next();
        let second = args.next();

        let command = match name.as_str() {
            "user-by-email" => Self::UserByEmail(required(first)?),
            "user-by-reset-token" => Self::UserByResetToken(parse_token(&required(first)?)?),
            "current-user" => Self::CurrentUser,
            "request-reset" => Self::RequestReset(required(first)?),
            "complete-reset" => Self::CompleteReset(parse_token(&required(first)?)?),
            "validate-url" => Self::ValidateUrl {
                url_segment: required(first)?,
                webpage_id: second.as_deref().map(parse_id).transpose()?,
            },
            "publish" => Self::Publish(parse_id(&required(first)?)?),
            "unpublish" => Self::Unpublish(parse_id(&required(first)?)?),
            "sort-pages" => Self::SortPages(first.as_deref().map(parse_id).transpose()?),
            "sort-widgets" => Self::SortWidgets {
                webpage_id: parse_id(&required(first)?)?,
                layout_area_id: parse_id(&required(second)?)?,
            },
            _ => return Err(usage_error()),
        };

        Ok(command)
    }
}

fn usage_error() -> AppError {
    AppError::Validation(USAGE.to_owned())
}

fn required(value: Option<String>) -> AppResult<String> {
    value.ok_or_else(usage_error)
}

fn parse_token(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|error| AppError::Validation(format!("invalid reset token '{value}': {error}")))
}

fn parse_id(value: &str) -> AppResult<EntityId> {
    value
        .trim()
        .parse::<i64>()
        .map(EntityId::new)
        .map_err(|error| AppError::Validation(format!("invalid id '{value}': {error}")))
}
