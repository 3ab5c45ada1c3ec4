use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use everyclass_core::{
    Error,
    api::{SearchResponse, StudentHit, TeacherHit},
    available::{AvailableRooms, RoomQuery},
    category::{CategoryIndex, Klass},
    course::CoursePage,
    daily::{MultiPeopleSchedule, PersonTimetable},
    page::{RoomPage, StudentView, TeacherPage},
    privacy::{self, ViewMode},
    search::{SearchOutcome, resolve_search},
    semester::SemesterCalendar,
};
use serde::Serialize;

use crate::{privacy_store::PrivacyStore, render, source::ScheduleSource};

/// 命令运行所需的依赖
pub struct AppContext {
    pub source: Box<dyn ScheduleSource>,
    pub privacy: Box<dyn PrivacyStore>,
    pub json: bool,
}

impl AppContext {
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
        emit(self.json, value, text)
    }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

/// 统一搜索入口：学生、老师、教室
pub async fn query_command(ctx: &AppContext, keyword: &str) -> Result<()> {
    let response = ctx
        .source
        .search(keyword)
        .await
        .with_context(|| format!("搜索 {} 失败", keyword))?;
    let outcome = resolve_search(&response);
    tracing::info!(keyword, resource_type = outcome.resource_type(), "搜索完成");

    match outcome {
        SearchOutcome::Room { rid, semester } => room_command(ctx, &rid, &semester).await,
        SearchOutcome::Student { sid, semester } => student_command(ctx, &sid, &semester).await,
        SearchOutcome::Teacher { tid, semester } => teacher_command(ctx, &tid, &semester).await,
        SearchOutcome::People { students, teachers } => {
            ctx.emit(&People { students, teachers }, |p| {
                render::render_people(&p.students, &p.teachers)
            })
        }
        SearchOutcome::NoSemester => {
            println!("没有可用学期");
            Ok(())
        }
        SearchOutcome::Nothing => {
            println!(
                "没有找到任何有关 {} 的信息，如果你认为这不应该发生，请联系我们。",
                keyword
            );
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct People {
    students: Vec<StudentHit>,
    teachers: Vec<TeacherHit>,
}

/// 学生课表
pub async fn student_command(ctx: &AppContext, sid: &str, semester: &str) -> Result<()> {
    let response = ctx
        .source
        .student(sid, semester)
        .await
        .with_context(|| format!("获取学生 {} 的课表失败", sid))?;
    let settings = ctx
        .privacy
        .get_privacy_settings(&response.sid)
        .await
        .context("读取隐私设置失败")?;

    let view = StudentView::assemble(&response, sid, semester, &settings);
    ctx.emit(&view, render::render_student)
}

/// 老师课表
pub async fn teacher_command(ctx: &AppContext, tid: &str, semester: &str) -> Result<()> {
    let response = ctx
        .source
        .teacher(tid, semester)
        .await
        .with_context(|| format!("获取老师 {} 的课表失败", tid))?;

    let page = TeacherPage::assemble(&response, tid, semester);
    ctx.emit(&page, render::render_teacher)
}

/// 教室课表
pub async fn room_command(ctx: &AppContext, rid: &str, semester: &str) -> Result<()> {
    let response = ctx
        .source
        .room(rid, semester)
        .await
        .with_context(|| format!("获取教室 {} 的课表失败", rid))?;

    let page = RoomPage::assemble(&response, rid, semester);
    ctx.emit(&page, render::render_room)
}

/// 课程详情
pub async fn course_command(ctx: &AppContext, cid: &str, semester: &str) -> Result<()> {
    let response = ctx
        .source
        .course(cid, semester)
        .await
        .with_context(|| format!("获取课程 {} 失败", cid))?;

    let page = CoursePage::from_response(&response, semester)?;
    ctx.emit(&page, render::render_course)
}

/// 多人日程参数
pub struct DailyParams {
    pub people: Vec<String>,
    pub date: NaiveDate,
    pub semester: String,
    pub semester_start: String,
}

/// 多人日程，附带无法确定身份的标识
#[derive(Debug, Serialize)]
pub struct DailyReport {
    #[serde(flatten)]
    pub schedule: MultiPeopleSchedule,
    pub unresolved_people: Vec<String>,
}

/// 多人在某一天的日程
pub async fn daily_command(ctx: &AppContext, params: DailyParams) -> Result<()> {
    let report = collect_daily(ctx, &params).await?;
    ctx.emit(&report, |r| {
        render::render_daily(&r.schedule, &r.unresolved_people)
    })
}

/// 学生开启 `show_table_on_page` 后其日程不可见；
/// 搜索不到或不唯一的标识单独列出。
async fn collect_daily(ctx: &AppContext, params: &DailyParams) -> Result<DailyReport> {
    let calendar = SemesterCalendar::from_date_str(&params.semester, &params.semester_start)
        .context("学期开始日期格式应为 YYYY-MM-DD")?;

    let mut timetables = Vec::new();
    let mut blocked = Vec::new();
    let mut unresolved_people = Vec::new();

    for identifier in &params.people {
        let search = match ctx.source.search(identifier).await {
            Ok(search) => search,
            Err(Error::NotFound(_)) => SearchResponse::default(),
            Err(e) => return Err(e).with_context(|| format!("搜索 {} 失败", identifier)),
        };

        let lessons = match resolve_search(&search) {
            SearchOutcome::Student { sid, .. } => {
                let settings = ctx.privacy.get_privacy_settings(&sid).await?;
                if privacy::select_view(&settings).mode == ViewMode::Blocked {
                    blocked.push(identifier.clone());
                }
                ctx.source.student(&sid, &params.semester).await?.courses
            }
            SearchOutcome::Teacher { tid, .. } => {
                ctx.source.teacher(&tid, &params.semester).await?.courses
            }
            other => {
                tracing::warn!(
                    identifier = %identifier,
                    resource_type = other.resource_type(),
                    "无法确定唯一的人员"
                );
                unresolved_people.push(identifier.clone());
                continue;
            }
        };

        timetables.push(PersonTimetable {
            identifier: identifier.clone(),
            lessons,
        });
    }

    let schedule = MultiPeopleSchedule::build(timetables, params.date, &calendar, |id| {
        !blocked.iter().any(|b| b == id)
    });

    Ok(DailyReport {
        schedule,
        unresolved_people,
    })
}

/// 空闲教室查询参数
pub struct AvailableRoomsParams {
    pub campus: String,
    pub building: String,
    pub date: NaiveDate,
    pub block: String,
    pub semester: String,
    pub semester_start: String,
}

/// 某栋楼某个时间段的空闲教室
pub async fn available_rooms_command(ctx: &AppContext, params: AvailableRoomsParams) -> Result<()> {
    let calendar = SemesterCalendar::from_date_str(&params.semester, &params.semester_start)
        .context("学期开始日期格式应为 YYYY-MM-DD")?;
    let query = RoomQuery::new(
        params.campus,
        params.building,
        params.date,
        &params.block,
        &calendar,
    )?;

    let rooms = ctx
        .source
        .available_rooms(&query)
        .await
        .with_context(|| format!("查询 {} {} 的空闲教室失败", query.campus, query.building))?;

    let result = AvailableRooms::new(query, rooms);
    ctx.emit(&result, render::render_available_rooms)
}

/// 课程类别浏览，数据来自教学班列表 JSON 文件
pub async fn categories_command(file: &Path, json: bool) -> Result<()> {
    let content = tokio::fs::read(file)
        .await
        .with_context(|| format!("读取 {} 失败", file.display()))?;
    let classes: Vec<Klass> = serde_json::from_slice(&content)?;

    let index = CategoryIndex::build(classes);
    emit(json, &index, |index| {
        let mut out = format!("共 {} 个教学班\n", index.total_classes);
        for category in &index.categories {
            out.push_str(&format!("{}:\n", category.name));
            for klass in &category.classes {
                out.push_str(&format!("  {} ({:.1})\n", klass.course.name, klass.score));
            }
        }
        out
    })
}
