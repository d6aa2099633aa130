//! Prompt Builder — one fixed template per stage, rendered deterministically
//! from the candidate profile, the job context, and earlier stage outputs.
//!
//! Templates are data: constants with `{placeholder}` markers replaced
//! before sending. A stage prompt may only draw on stages that come earlier
//! in the pipeline; the orchestrator guarantees those outputs exist before
//! the builder is called, so a missing prior output is a contract violation
//! and panics rather than degrading.

use crate::models::profile::CandidateProfile;
use crate::scrape::JobContext;

use super::{StageId, StageResult};

const ANALYZE_POSTING_TEMPLATE: &str = r#"**Task 1: Analyze Job Posting**

Based on the provided context below (URL and potentially scraped text), please:
1.  Access the live Job Posting URL ({job_url}) if your capabilities allow. Prioritize information directly from the live URL.
2.  If URL access fails or is not possible, rely on the provided scraped text.
3.  If both URL access fails and no usable text is provided, state clearly that you cannot perform the analysis.
4.  If successful, extract and summarize:
    * Key responsibilities.
    * Required qualifications ("must-haves").
    * Preferred qualifications ("nice-to-haves").
    * Essential keywords and skills mentioned in the posting.

**Context:**
{job_context}

Present the output clearly under the headings: Responsibilities, Required Qualifications, Preferred Qualifications, and Keywords/Skills."#;

const MAP_CANDIDATE_TEMPLATE: &str = r#"**Task 2: Candidate Data Mapping (Against Job Requirements)**

You are given the job requirements analysis from Task 1 (assume it was successful) and the profile data of a specific candidate below.
**Your task is to compare the candidate's profile against the job requirements.** Do NOT invent information about the candidate; base your analysis strictly on the provided data.

**Candidate Data:**
```json
{candidate_json}
```

**Perform the following comparisons:**
* **Qualification & Skill Mapping:** Compare the candidate's skills (technical, core, soft) and education against the required and preferred qualifications from the job posting. Identify key strengths (strong matches) and potential gaps.
* **Experience Mapping:** Evaluate how the candidate's listed work experience (roles, responsibilities) demonstrates the key responsibilities and required qualifications mentioned in the job posting. Provide specific examples from the candidate's experience where possible.
* **Achievement Mapping:** Select the candidate's accomplishments (from their profile) that are MOST relevant and impactful for THIS specific job posting's responsibilities and requirements.
* **Soft Skill & Cultural Fit Assessment (Preliminary):** Based on the candidate's listed soft skills and general professional summary, assess potential alignment with the soft skills likely needed for the role (based on Task 1) and any cultural hints inferable from the job posting/company type. Note alignment points.

Present the output clearly under headings for each mapping/assessment type (e.g., Qualification/Skill Analysis, Experience Relevance, Relevant Achievements, Soft Skill/Culture Alignment). Be objective in identifying both strengths and potential gaps."#;

const IDEAL_PROFILE_TEMPLATE: &str = r#"**Task 3: Ideal Profile Definition & Personalized Positioning**

Based on the analysis of the job description (from Task 1, assuming success) and the candidate mapping (Task 2):
1.  **Ideal Candidate Profile (Employer View):** Briefly restate or summarize the profile of the *employer's ideal candidate* based *only* on the job posting analysis from Task 1.
2.  **Personalized Candidate Positioning:** Craft a compelling candidate narrative or professional summary (3-5 sentences) *specifically tailored for this job*. This summary should highlight the *provided candidate's* most relevant strengths, experiences, and achievements (identified in Task 2) that directly address the requirements of *this specific job posting*.

Present the output under the headings 'Ideal Candidate Profile (Employer View)' and 'Personalized Candidate Positioning (For This Job)'."#;

const VET_COMPANY_TEMPLATE: &str = r#"**Task 4: Initial Company Vetting**

Perform **brief** research on the company associated with the job posting URL ({job_url}). Use your web Browse capabilities if available. If the company cannot be reliably determined, state that. Summarize concisely covering:
* Company Overview (Business, Main Products/Services)
* General Reputation / Recent Highlight (e.g., major funding, award, notable product launch)
* Industry & Main Competitors
* Potential Red Flags (briefly, if any obvious ones surface)

This is intended as a preliminary check only. Present findings clearly."#;

const SYNTHESIZE_TEMPLATE: &str = r#"**Task 5: Synthesize Findings (Personalized)**

Based on all previous analysis steps (Job Req Analysis, Candidate Mapping, Ideal Profile, Positioning, Initial Company Vetting - assuming success):
1.  Provide a final **Overall Fit Assessment** for the *provided candidate* against this specific role and company. Classify the fit (e.g., Strong, Good, Moderate, Weak) and briefly explain why, considering the alignment of skills/experience (Task 2), how they compare to the ideal profile (Task 3), and the company context (Task 4). Mention key strengths and any significant gaps identified.
2.  Summarize the *provided candidate's* **Unique Value Proposition (UVP)** for this role in 1-2 sentences. What makes *this specific candidate* stand out for *this specific opportunity*, based on your analysis?

Present the output under the headings 'Overall Fit Assessment (Personalized)' and 'Unique Value Proposition (Personalized)'."#;

const DEEP_DIVE_TEMPLATE: &str = r#"**Task 5.5: Deep Dive Company Research**

Perform a **comprehensive deep dive research analysis** on the company associated with the job posting URL ({job_url}). Utilize your web Browse capabilities extensively. If the company cannot be reliably determined, state that. Structure the report clearly with the following sections:

1.  **Company Overview:** Full name, headquarters, year founded, brief mission statement.
2.  **History & Founding Story:** Key milestones, founders (if notable), evolution over time.
3.  **Key Leadership:** CEO, relevant C-suite executives (e.g., Head of Marketing if relevant to job), board members if significant and public. Include names and titles; brief public bio summary if available.
4.  **Products & Services:** Detailed breakdown of main offerings, flagship products/services, key features, and target customer segments.
5.  **Business Model:** How does the company primarily make money? (e.g., SaaS subscriptions, advertising, direct sales, etc.)
6.  **Market & Competitors:** In-depth analysis of the industry landscape. Identify primary and secondary competitors. What are the company's key differentiators or competitive advantages? What are its weaknesses?
7.  **Recent News & Developments (Last 6-12 months):** Significant funding rounds, acquisitions, major product launches, strategic partnerships, significant press releases, notable awards, or any major controversies.
8.  **Financial Health (Public Info):** If public (or recent reliable reports), mention revenue trends, valuation, funding status, profitability status. If private, note that details may be limited.
9.  **Mission, Vision & Values:** Explicitly stated mission, vision, and core values (usually found on 'About Us' or 'Careers' pages).
10. **Culture Insights:** Synthesize information about the work environment, employee reviews (cite source type like 'Glassdoor mentions...', 'Company career page emphasizes...'), DE&I initiatives. Provide a balanced view if possible.
11. **Potential Interview Talking Points:** Based on the research, suggest 2-3 specific topics the candidate could discuss to show interest and knowledge (e.g., "Ask about the strategy behind the recent [Product X] launch," "Discuss how they are addressing [Industry Challenge Y]," "Mention alignment with their stated value of [Value Z]").

Present the findings clearly under numbered headings corresponding to the sections above. Be thorough and cite information implicitly through the details provided."#;

const RESUME_TAILORING_TEMPLATE: &str = r#"**Task 6: Resume Tailoring Suggestions**

Act as a resume optimization expert. You are given the analysis of a job posting (Step 1), the **detailed company research (Step 5.5)**, and the candidate's profile. Your goal is to suggest specific, actionable changes to the candidate's resume *text* to better align it with THIS specific job opportunity. Do NOT rewrite the entire resume. Focus on targeted content suggestions.

**Job Posting Analysis (from Step 1):**
```
{step1}
```

**Deep Dive Company Research (from Step 5.5):**
```
{deep_dive}
```

**Candidate Data:**
```json
{candidate_json}
```

**Provide suggestions for:**
1.  **Summary Enhancement:** Suggest 1-2 minor tweaks to the candidate's summary to better reflect keywords or values relevant to this specific job/company based on the deep dive research.
2.  **Keyword Integration:** Identify 3-5 high-priority keywords from the job description that are weakly represented or missing in the candidate's profile (skills/experience) and suggest where/how they could be naturally integrated (e.g., in experience bullet points, skills list).
3.  **Experience Bullet Point Rephrasing:** Select 2-3 existing bullet points from the candidate's work experience that are relevant to the job. Suggest alternative phrasing using strong action verbs and keywords from the job description to maximize impact for *this* role. Show the original and the suggested rephrased version.
4.  **Skills Highlighting:** Recommend which 3-4 skills (from the candidate's list) should be most prominently highlighted or mentioned early in the application materials for this specific job.

Present suggestions clearly under headings. Be specific and provide concrete examples of rephrasing."#;

const COVER_LETTER_TEMPLATE: &str = r#"**Task 7: Cover Letter Draft Generation**

Act as a professional writer crafting a tailored cover letter draft for the candidate applying to the specific job identified in the inputs. The draft should be tailored, professional, and persuasive.

**Job Posting Analysis (from Step 1 - especially responsibilities & qualifications):**
```
{step1}
```

**Deep Dive Company Research (from Step 5.5 - use mission, values, news, products):**
```
{deep_dive}
```

**Candidate Data (use relevant skills, experience, accomplishments):**
```json
{candidate_json}
```

**Personalized Positioning Statement (from Step 3):**
```
{step3}
```

**Instructions:**
1.  **Address:** Include placeholders for recipient name/title/company address if possible, otherwise use generic greetings. Mention the specific job title being applied for.
2.  **Introduction:** Start with a strong opening referencing the job posting and briefly state the candidate's core value proposition (drawing from the personalized positioning statement).
3.  **Body Paragraphs (2-3):**
    * Connect the candidate's key skills and experiences (provide 2-3 specific examples from their profile) directly to the most critical requirements mentioned in the job posting analysis. Use keywords naturally.
    * Subtly weave in 1-2 relevant insights from the **deep dive company research** to demonstrate genuine interest and alignment (e.g., connect skills to a company value, mention excitement about a recent product launch or company direction). Avoid just listing facts.
4.  **Conclusion:** Reiterate enthusiasm for the role and the company. Include a clear call to action (e.g., requesting an interview).
5.  **Tone:** Professional, confident, and tailored.

Generate the complete cover letter text draft. Include placeholders like [Recipient Name], [Company Address], [Your Name] where appropriate."#;

/// Renders the prompt for `stage`. Pure: same inputs, same prompt.
pub fn build_prompt(
    stage: StageId,
    profile: &CandidateProfile,
    job: &JobContext,
    prior: &[StageResult],
) -> String {
    match stage {
        StageId::AnalyzePosting => ANALYZE_POSTING_TEMPLATE
            .replace("{job_url}", &job.url)
            .replace("{job_context}", &job.context_block()),
        StageId::MapCandidate => {
            MAP_CANDIDATE_TEMPLATE.replace("{candidate_json}", &profile.prompt_json())
        }
        StageId::IdealProfile => IDEAL_PROFILE_TEMPLATE.to_string(),
        StageId::VetCompany => VET_COMPANY_TEMPLATE.replace("{job_url}", &job.url),
        StageId::Synthesize => SYNTHESIZE_TEMPLATE.to_string(),
        StageId::DeepDiveResearch => DEEP_DIVE_TEMPLATE.replace("{job_url}", &job.url),
        StageId::ResumeTailoring => RESUME_TAILORING_TEMPLATE
            .replace("{step1}", prior_text(prior, StageId::AnalyzePosting, stage))
            .replace("{deep_dive}", prior_text(prior, StageId::DeepDiveResearch, stage))
            .replace("{candidate_json}", &profile.prompt_json()),
        StageId::CoverLetterDraft => COVER_LETTER_TEMPLATE
            .replace("{step1}", prior_text(prior, StageId::AnalyzePosting, stage))
            .replace("{deep_dive}", prior_text(prior, StageId::DeepDiveResearch, stage))
            .replace("{candidate_json}", &profile.prompt_json())
            .replace("{step3}", prior_text(prior, StageId::IdealProfile, stage)),
    }
}

/// Looks up the recorded output of an earlier stage. The orchestrator runs
/// stages in definition order, so the output must exist; its absence means
/// the builder was called out of order.
fn prior_text<'a>(prior: &'a [StageResult], wanted: StageId, building: StageId) -> &'a str {
    assert!(
        wanted.sequence_index() < building.sequence_index(),
        "'{}' may only reference earlier stages, not '{}'",
        building.label(),
        wanted.label()
    );
    prior
        .iter()
        .find(|r| r.stage == wanted)
        .map(|r| r.text.as_str())
        .unwrap_or_else(|| {
            panic!(
                "'{}' built without prior output of '{}'",
                building.label(),
                wanted.label()
            )
        })
}
