//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::ARTICLES_DIR;

const CONFIG: &str = r#"# Crewpost Configuration

# Site
title: Crewpost
subtitle: ''
description: ''
author: Editorial Team
language: en

# URL
url: http://example.com
root: /

# Directory
source_dir: source
public_dir: public
article_dir: blog

# Articles
date_format: MMMM DD, YYYY
toc: true
words_per_minute: 200
excerpt_length: 160

# Abort generation when a catalog file is rejected
strict: true
"#;

const STYLESHEET: &str = r#"body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 46rem; padding: 0 1rem; }
.site-header, .site-footer { padding: 1rem 0; }
.article-hero img { max-width: 100%; }
.toc, .takeaways, .block, .cta { margin: 1.5rem 0; }
.block-label { font-weight: bold; margin: 0; }
.block-tip { border-left: 4px solid #2b7bb9; padding: 0.5rem 1rem; }
.myth { color: #a33; }
.reality { color: #285; }
.script-wrong p:last-child { text-decoration: line-through; }
.block-timeline { list-style: none; padding: 0; }
.phase-card { border: 1px solid #ddd; margin: 0.5rem 0; padding: 0.5rem 1rem; }
.block-table table { border-collapse: collapse; width: 100%; }
.block-table th, .block-table td { border: 1px solid #ddd; padding: 0.25rem 0.5rem; }
.block-unsupported { color: #888; font-style: italic; }
.cta-button { background: #2b7bb9; color: #fff; display: inline-block; padding: 0.5rem 1rem; }
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let articles_dir = target_dir.join("source").join(ARTICLES_DIR);

    fs::create_dir_all(&articles_dir)?;
    fs::create_dir_all(target_dir.join("source/css"))?;

    fs::write(target_dir.join("_config.yml"), CONFIG)?;
    fs::write(target_dir.join("source/css/style.css"), STYLESHEET)?;

    let today = chrono::Local::now().date_naive();
    let sample = format!(
        r#"slug: welcome-aboard
title: Welcome Aboard
hook: Everything you need to know **before** your first day of cabin crew training.
author:
  name: Editorial Team
  role: Training Desk
date: {}
category: Cabin Crew
takeaways:
  - Training lasts about six weeks
  - Safety drills come before service training
blocks:
  - type: heading
    content: What to expect
  - type: paragraph
    content: |
      Read the [course outline](/blog/welcome-aboard/) first.

      Then pack for a long week.
  - type: list
    items:
      - Passport
      - Uniform measurements
  - type: tip
    content: Arrive **early** on day one.
  - type: myth-buster
    myth: You must be tall to fly.
    reality: Airlines set a reach test, not a height rule.
  - type: checklist
    items:
      - Medical certificate
      - Swim test
  - type: script-compare
    wrong: I just like travelling.
    right: I enjoy looking after people in every situation.
    reason: It shows the service mindset recruiters look for.
  - type: timeline
    items:
      - phase: Week 1
        title: Safety
        description: Emergency procedures and equipment.
      - phase: Week 2
        title: Service
        description: Galley and passenger care.
  - type: table
    headers: [Airline, Base]
    rows:
      - [Skyways, London]
      - [Coastal Air, Dubai]
faqs:
  - question: Do I need a degree?
    answer: No. Most airlines ask for a high school diploma.
cta:
  text: Browse all articles
  link: /
  icon: plane
"#,
        today.format("%Y-%m-%d")
    );

    fs::write(articles_dir.join("welcome-aboard.yml"), sample)?;

    Ok(())
}
